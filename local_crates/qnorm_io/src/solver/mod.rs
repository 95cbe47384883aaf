// qnorm_io
// Copyright (C) 2021  Artois University and CNRS
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
//
// Contributors:
//   *   CRIL - initial API and implementation

//! Interaction with an external QBF solver.

mod external_solver;
pub use external_solver::ExternalSolver;

mod solver_options;
pub use solver_options::SolverOptions;

mod solver_output;
pub use solver_output::Evaluation;
pub use solver_output::Measurement;
pub use solver_output::SolverStatus;
