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

use super::{Literal, VarId};
use anyhow::Result;
use rustc_hash::FxHashSet;

/// A disjunction of [`Literal`]s.
///
/// The order of the literals is kept as given, and so are repeated literals.
///
/// # Examples
///
/// ```
/// use qnorm_logic::Clause;
///
/// let clause = Clause::from_dimacs(&[1, -2, 3]).unwrap();
/// assert_eq!(3, clause.len());
/// assert_eq!("1 -2 3 0", format!("{}", clause));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clause(Vec<Literal>);

impl Clause {
    /// Builds a new clause given its literals.
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause(literals)
    }

    /// Builds a new clause given the DIMACS representation of its literals.
    ///
    /// The representation must not contain the terminating `0`.
    pub fn from_dimacs(values: &[isize]) -> Result<Self> {
        values
            .iter()
            .map(|v| Literal::from_dimacs(*v))
            .collect::<Result<Vec<Literal>>>()
            .map(Clause)
    }

    /// Returns the DIMACS representation of the literals of this clause.
    pub fn to_dimacs(&self) -> Vec<isize> {
        self.0.iter().map(|l| l.to_dimacs()).collect()
    }

    /// Returns the literals of this clause.
    pub fn as_literals(&self) -> &[Literal] {
        &self.0
    }

    /// Returns the number of literals of this clause.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if this clause has no literal (and is thus unsatisfiable).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the variables this clause refers to, each of them once, by order of first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{Clause, VarId};
    ///
    /// let clause = Clause::from_dimacs(&[3, -1, -3, 2]).unwrap();
    /// assert_eq!(
    ///     vec![VarId::from(3), VarId::from(1), VarId::from(2)],
    ///     clause.variables()
    /// );
    /// ```
    pub fn variables(&self) -> Vec<VarId> {
        let mut seen = FxHashSet::default();
        self.0
            .iter()
            .map(|l| l.var_id())
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Returns `true` if a literal of this clause refers to the given variable.
    pub fn contains_var(&self, var_id: VarId) -> bool {
        self.0.iter().any(|l| l.var_id() == var_id)
    }

    /// Replaces in place each occurrence of a variable by another one, keeping the polarities.
    ///
    /// Returns the number of literals that were rewritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{Clause, VarId};
    ///
    /// let mut clause = Clause::from_dimacs(&[1, -2, -1]).unwrap();
    /// assert_eq!(2, clause.replace_var(VarId::from(1), VarId::from(7)));
    /// assert_eq!(vec![7, -2, -7], clause.to_dimacs());
    /// ```
    pub fn replace_var(&mut self, before: VarId, after: VarId) -> usize {
        let mut n_replaced = 0;
        for l in self.0.iter_mut() {
            if l.var_id() == before {
                *l = l.with_var_id(after);
                n_replaced += 1;
            }
        }
        n_replaced
    }

    /// Checks whether this clause is satisfied by an assignment.
    ///
    /// The assignment is indexed by variable identifiers; index `0` is unused.
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.0
            .iter()
            .any(|l| assignment[usize::from(l.var_id())] == l.polarity())
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Clause::new(literals)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for l in self.0.iter() {
            write!(f, "{} ", l)?;
        }
        write!(f, "0")
    }
}
