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

use super::{Clause, VarId};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};

/// The highest number of variables a formula may have.
///
/// It is the highest variable index that fits in a DIMACS literal handled by SAT solvers (`i32`).
pub const MAX_VARS: usize = i32::MAX as usize;

/// A CNF formula, possibly prefixed by a single block of universal variables (2QBF).
///
/// Variables range from `1` to [`n_vars`](Formula::n_vars).
/// The variables that are not universal are existential, and are quantified after the universal ones.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{Clause, Formula, VarId};
///
/// let clauses = vec![
///     Clause::from_dimacs(&[1, 2]).unwrap(),
///     Clause::from_dimacs(&[-1, 3]).unwrap(),
/// ];
/// let universals = vec![VarId::from(1)].into_iter().collect();
/// let formula = Formula::new(3, clauses, universals).unwrap();
/// assert_eq!(vec![VarId::from(2), VarId::from(3)], formula.existentials());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    n_vars: usize,
    clauses: Vec<Clause>,
    universals: BTreeSet<VarId>,
}

impl Formula {
    /// Builds a new formula.
    ///
    /// An error is returned if `n_vars` exceeds [`MAX_VARS`],
    /// or if a clause or the universal block refers to a variable outside `[1, n_vars]`.
    pub fn new(n_vars: usize, clauses: Vec<Clause>, universals: BTreeSet<VarId>) -> Result<Self> {
        if n_vars > MAX_VARS {
            return Err(anyhow!(
                "the number of variables {} exceeds the maximum of {}",
                n_vars,
                MAX_VARS
            ));
        }
        if let Some(u) = universals.iter().find(|u| !is_in_range(n_vars, **u)) {
            return Err(anyhow!(
                "universal variable {} is out of range [1, {}]",
                u,
                n_vars
            ));
        }
        for (i, clause) in clauses.iter().enumerate() {
            if let Some(l) = clause
                .as_literals()
                .iter()
                .find(|l| !is_in_range(n_vars, l.var_id()))
            {
                return Err(anyhow!(
                    "literal {} of clause {} is out of range [1, {}]",
                    l,
                    i,
                    n_vars
                ));
            }
        }
        Ok(Formula {
            n_vars,
            clauses,
            universals,
        })
    }

    pub(crate) fn from_data_unchecked(
        n_vars: usize,
        clauses: Vec<Clause>,
        universals: BTreeSet<VarId>,
    ) -> Self {
        Formula {
            n_vars,
            clauses,
            universals,
        }
    }

    pub(crate) fn into_parts(self) -> (usize, Vec<Clause>, BTreeSet<VarId>) {
        (self.n_vars, self.clauses, self.universals)
    }

    /// Returns the highest variable index in use.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the clauses of this formula.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the number of clauses of this formula.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the universal variables, in ascending order.
    pub fn universals(&self) -> &BTreeSet<VarId> {
        &self.universals
    }

    /// Returns `true` if the variable is universally quantified.
    pub fn is_universal(&self, var_id: VarId) -> bool {
        self.universals.contains(&var_id)
    }

    /// Returns the existential variables, in ascending order.
    pub fn existentials(&self) -> Vec<VarId> {
        (1..=self.n_vars)
            .map(VarId::from)
            .filter(|v| !self.universals.contains(v))
            .collect()
    }

    /// Returns, for each variable occurring in a clause, the number of clauses it occurs in.
    ///
    /// A clause mentioning a variable several times counts once.
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::{Clause, Formula, VarId};
    ///
    /// let clauses = vec![
    ///     Clause::from_dimacs(&[1, -1, 2]).unwrap(),
    ///     Clause::from_dimacs(&[-1]).unwrap(),
    /// ];
    /// let formula = Formula::new(2, clauses, Default::default()).unwrap();
    /// let counts = formula.occurrence_counts();
    /// assert_eq!(vec![(VarId::from(1), 2), (VarId::from(2), 1)], counts.into_iter().collect::<Vec<_>>());
    /// ```
    pub fn occurrence_counts(&self) -> BTreeMap<VarId, usize> {
        let mut counts = BTreeMap::new();
        for clause in self.clauses.iter() {
            for v in clause.variables() {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns the highest number of clauses a single variable occurs in.
    pub fn max_occurrences(&self) -> usize {
        self.occurrence_counts().values().copied().max().unwrap_or(0)
    }
}

fn is_in_range(n_vars: usize, var_id: VarId) -> bool {
    let v = usize::from(var_id);
    v >= 1 && v <= n_vars
}
