// qnorm_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

mod clause_assembler;
pub use clause_assembler::ClauseAssembler;

mod occurrence_index;
pub use occurrence_index::OccurrenceIndex;

mod variable_splitter;
pub use variable_splitter::normalize;
pub use variable_splitter::VariableSplitter;
pub use variable_splitter::MIN_SPLITTING_THRESHOLD;
pub use variable_splitter::MIN_THRESHOLD;
