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

use anyhow::{Context, Result};
use qnorm_logic::Formula;
use std::io::Write;

/// A writer for the QDIMACS format.
///
/// The output begins by the optional comment, followed by the `p cnf` header.
/// If the formula has universal variables, an `a` line lists them and an `e` line lists the remaining variables, both in ascending order.
/// The clauses are then written one per line.
///
/// # Example
///
/// ```
/// # use qnorm_io::{Clause, Formula, QdimacsWriter, VarId};
/// let clauses = vec![Clause::from_dimacs(&[1, -2]).unwrap()];
/// let universals = vec![VarId::from(1)].into_iter().collect();
/// let formula = Formula::new(3, clauses, universals).unwrap();
/// let mut out = Vec::new();
/// QdimacsWriter::new().write(&formula, &mut out).unwrap();
/// assert_eq!("p cnf 3 1\na 1 0\ne 2 3 0\n1 -2 0\n", String::from_utf8(out).unwrap());
/// ```
#[derive(Default)]
pub struct QdimacsWriter {
    comment: Option<String>,
}

impl QdimacsWriter {
    /// Creates a new `QdimacsWriter` writing no comment.
    pub fn new() -> Self {
        QdimacsWriter::default()
    }

    /// Sets the comment written before the header.
    ///
    /// A multiline comment produces one comment line per line of text.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = Some(comment.to_string())
    }

    /// Writes a formula using the QDIMACS format to the provided writer.
    ///
    /// # Arguments
    ///
    /// * `formula` - the formula
    /// * `writer` - the writer
    pub fn write(&self, formula: &Formula, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing a QDIMACS formula";
        if let Some(c) = &self.comment {
            for line in c.lines() {
                writeln!(writer, "c {}", line).context(context)?;
            }
        }
        writeln!(writer, "p cnf {} {}", formula.n_vars(), formula.n_clauses()).context(context)?;
        if !formula.universals().is_empty() {
            write!(writer, "a").context(context)?;
            for u in formula.universals() {
                write!(writer, " {}", u).context(context)?;
            }
            writeln!(writer, " 0").context(context)?;
            let existentials = formula.existentials();
            if !existentials.is_empty() {
                write!(writer, "e").context(context)?;
                for e in existentials {
                    write!(writer, " {}", e).context(context)?;
                }
                writeln!(writer, " 0").context(context)?;
            }
        }
        for clause in formula.clauses() {
            writeln!(writer, "{}", clause).context(context)?;
        }
        writer.flush().context(context)
    }
}
