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

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use qnorm_logic::{Clause, Formula, VarId, MAX_VARS};
use regex::Regex;
use std::{
    cell::RefCell,
    collections::BTreeSet,
    io::{BufRead, BufReader, Read},
};

lazy_static! {
    static ref HEADER_PATTERN: Regex = Regex::new(r"^\s*p\s+cnf\s+(\d+)\s+(\d+)\s*$").unwrap();
}

/// A reader for the QDIMACS format, restricted to 2QBF.
///
/// Beside the usual DIMACS content (comments, a `p cnf` header and clauses), at most one universal block (`a` line) is accepted.
/// Existential blocks (`e` lines) are accepted and ignored, since every variable which is not universal is existential.
/// Each clause must be given on a single line, terminated by a `0`.
///
/// Reading a formula may lead to warnings (e.g. if the number of clauses does not match the header).
/// These warnings can be collected by registering handlers with [`add_warning_handler`](Self::add_warning_handler).
///
/// # Example
///
/// ```
/// # use qnorm_io::QdimacsReader;
/// let content = "c a comment\np cnf 3 2\na 1 0\ne 2 3 0\n1 -2 0\n-1 3 0\n";
/// let formula = QdimacsReader::default().read(&mut content.as_bytes()).unwrap();
/// assert_eq!(3, formula.n_vars());
/// assert_eq!(2, formula.n_clauses());
/// assert!(formula.is_universal(1.into()));
/// ```
#[derive(Default)]
pub struct QdimacsReader<'a> {
    warning_handlers: Vec<RefCell<&'a mut dyn FnMut(usize, String)>>,
}

#[derive(Default)]
struct ReadState {
    header: Option<Header>,
    universals: Option<BTreeSet<VarId>>,
    clauses: Vec<Clause>,
}

struct Header {
    line_index: usize,
    n_vars: usize,
    n_clauses: usize,
}

impl<'a> QdimacsReader<'a> {
    /// Reads a formula.
    ///
    /// In case of a syntax error, the error chain begins by the (0-based) index of the line at fault.
    ///
    /// # Arguments
    ///
    /// * `reader` - the reader providing the QDIMACS content
    pub fn read(&self, reader: &mut dyn Read) -> Result<Formula> {
        let br = BufReader::new(reader);
        let mut state = ReadState::default();
        for (i, line) in br.lines().enumerate() {
            let context = move || format!("while reading line {}", i);
            let l = line.with_context(context)?;
            self.read_line(&mut state, i, &l).with_context(context)?;
        }
        let header = state
            .header
            .ok_or_else(|| anyhow!(r#"no "p cnf" header found"#))?;
        if header.n_clauses != state.clauses.len() {
            self.warn(
                header.line_index,
                format!(
                    "the header announces {} clause(s), but {} were found",
                    header.n_clauses,
                    state.clauses.len()
                ),
            );
        }
        Formula::new(
            header.n_vars,
            state.clauses,
            state.universals.unwrap_or_default(),
        )
    }

    fn read_line(&self, state: &mut ReadState, line_index: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            return Ok(());
        }
        let mut words = trimmed.split_whitespace();
        match words.next() {
            Some("p") => self.read_header(state, line_index, line),
            Some("a") => {
                if state.universals.is_some() {
                    return Err(anyhow!("duplicate quantifier block"));
                }
                let mut universals = BTreeSet::new();
                for v in read_zero_terminated(words, line)? {
                    if v < 0 {
                        return Err(syntax_error(line));
                    }
                    if !universals.insert(VarId::from(v as usize)) {
                        self.warn(
                            line_index,
                            format!("variable {} is listed twice in the quantifier block", v),
                        );
                    }
                }
                state.universals = Some(universals);
                Ok(())
            }
            Some("e") => Ok(()),
            _ => {
                let literals = read_zero_terminated(trimmed.split_whitespace(), line)?;
                state.clauses.push(Clause::from_dimacs(&literals)?);
                Ok(())
            }
        }
    }

    fn read_header(&self, state: &mut ReadState, line_index: usize, line: &str) -> Result<()> {
        if state.header.is_some() {
            return Err(anyhow!(r#"duplicate "p cnf" header"#));
        }
        let captures = HEADER_PATTERN
            .captures(line)
            .ok_or_else(|| syntax_error(line))?;
        let n_vars = captures[1]
            .parse::<usize>()
            .context("while parsing the number of variables")?;
        if n_vars == 0 {
            return Err(anyhow!("the number of variables must be positive"));
        }
        if n_vars > MAX_VARS {
            return Err(anyhow!(
                "the number of variables {} exceeds the maximum of {}",
                n_vars,
                MAX_VARS
            ));
        }
        let n_clauses = captures[2]
            .parse::<usize>()
            .context("while parsing the number of clauses")?;
        state.header = Some(Header {
            line_index,
            n_vars,
            n_clauses,
        });
        Ok(())
    }

    /// Adds a handler for the warnings raised while reading a formula.
    ///
    /// The handler receives the (0-based) index of the line the warning refers to and a message.
    ///
    /// # Arguments
    ///
    /// * `h` - the warning handler
    ///
    /// # Example
    ///
    /// ```
    /// # use qnorm_io::QdimacsReader;
    /// let mut n_warnings = 0;
    /// let mut handler = |_line: usize, _reason: String| n_warnings += 1;
    /// let mut reader = QdimacsReader::default();
    /// reader.add_warning_handler(&mut handler);
    /// reader.read(&mut "p cnf 2 3\n1 2 0\n".as_bytes()).unwrap();
    /// drop(reader);
    /// assert_eq!(1, n_warnings);
    /// ```
    pub fn add_warning_handler(&mut self, h: &'a mut dyn FnMut(usize, String)) {
        self.warning_handlers.push(RefCell::new(h));
    }

    fn warn(&self, line_index: usize, message: String) {
        for h in self.warning_handlers.iter() {
            let mut handler = h.borrow_mut();
            (*handler)(line_index, message.clone());
        }
    }
}

fn read_zero_terminated<'b>(
    words: impl Iterator<Item = &'b str>,
    line: &str,
) -> Result<Vec<isize>> {
    let mut values = words
        .map(|w| w.parse::<isize>().map_err(|_| syntax_error(line)))
        .collect::<Result<Vec<isize>>>()?;
    match values.pop() {
        Some(0) if values.iter().all(|v| *v != 0) => Ok(values),
        _ => Err(syntax_error(line)),
    }
}

fn syntax_error(line: &str) -> anyhow::Error {
    anyhow!(r#"syntax error in line "{}""#, line)
}
