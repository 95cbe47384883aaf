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

use super::{ClauseAssembler, OccurrenceIndex};
use crate::{Clause, Formula, Literal, RcMut, VarId, MAX_VARS};
use anyhow::{anyhow, Result};

/// The lowest occurrence threshold accepted by a [`VariableSplitter`].
pub const MIN_THRESHOLD: usize = 3;

/// The lowest occurrence threshold under which variables can be split.
///
/// A variable in the middle of a chain occurs in the two connectors to its predecessor and in the two connectors to its successor.
/// Under this threshold, it cannot hold any other clause and the chain never ends.
pub const MIN_SPLITTING_THRESHOLD: usize = 5;

/// Splits the variables occurring in too many clauses.
///
/// When a variable `v` occurs in more clauses than the threshold, a fresh variable `v'` is created
/// together with the two connector clauses `v ∨ ¬v'` and `¬v ∨ v'`, which make `v` and `v'` equivalent.
/// The connectors are put in front of the occurrences of `v`;
/// `v` keeps the first `threshold` of them and `v'` replaces `v` in the others.
/// Then `v'` is processed in turn, since it may itself occur too often.
///
/// Since `v'` is equivalent to `v`, the resulting formula is equisatisfiable to the initial one.
/// Fresh variables are existential, even when the split variable is universal:
/// for each assignment of the universals, the fresh variables can copy the values of the variables they come from.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{Clause, Formula, VariableSplitter};
///
/// let clauses = (2..=9)
///     .map(|v| Clause::from_dimacs(&[1, v]).unwrap())
///     .collect();
/// let formula = Formula::new(9, clauses, Default::default()).unwrap();
/// let normalized = VariableSplitter::new(5).unwrap().normalize(formula).unwrap();
/// assert_eq!(12, normalized.n_vars());
/// assert_eq!(5, normalized.max_occurrences());
/// ```
pub struct VariableSplitter {
    threshold: usize,
}

impl VariableSplitter {
    /// Builds a splitter ensuring no variable occurs in more than `threshold` clauses.
    ///
    /// An error is returned if the threshold is lower than [`MIN_THRESHOLD`].
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold < MIN_THRESHOLD {
            return Err(anyhow!(
                "the occurrence threshold must be at least {} (got {})",
                MIN_THRESHOLD,
                threshold
            ));
        }
        Ok(VariableSplitter { threshold })
    }

    /// Returns the maximal number of occurrences of a variable.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Splits the variables of a formula until none of them occurs more than the threshold.
    ///
    /// An error is returned, before anything is changed, if a variable must be split but the threshold is lower than [`MIN_SPLITTING_THRESHOLD`].
    /// An error is also returned if the normalized formula would have more than [`MAX_VARS`] variables.
    pub fn normalize(&self, formula: Formula) -> Result<Formula> {
        self.check_splittable(&formula)?;
        let (n_vars, clauses, universals) = formula.into_parts();
        let mut index = OccurrenceIndex::build(n_vars, clauses);
        self.split(&mut index);
        if index.n_vars() > MAX_VARS {
            return Err(anyhow!(
                "the normalized formula would have {} variables, more than the maximum of {}",
                index.n_vars(),
                MAX_VARS
            ));
        }
        let clauses = ClauseAssembler::new().flatten(&index);
        Ok(Formula::from_data_unchecked(
            index.n_vars(),
            clauses,
            universals,
        ))
    }

    fn check_splittable(&self, formula: &Formula) -> Result<()> {
        if self.threshold >= MIN_SPLITTING_THRESHOLD {
            return Ok(());
        }
        match formula
            .occurrence_counts()
            .into_iter()
            .find(|(_, n)| *n > self.threshold)
        {
            Some((v, n)) => Err(anyhow!(
                "variable {} occurs in {} clauses and must be split, which requires an occurrence threshold of at least {} (got {})",
                v,
                n,
                MIN_SPLITTING_THRESHOLD,
                self.threshold
            )),
            None => Ok(()),
        }
    }

    /// Splits the variables of an occurrence index until none of them occurs more than the threshold.
    ///
    /// Returns the number of variables that were introduced.
    ///
    /// # Panics
    ///
    /// Panics if a variable must be split while the threshold is lower than [`MIN_SPLITTING_THRESHOLD`].
    pub fn split(&self, index: &mut OccurrenceIndex) -> usize {
        assert!(
            self.threshold >= MIN_SPLITTING_THRESHOLD || index.max_occurrences() <= self.threshold,
            "cannot split variables with an occurrence threshold of {}",
            self.threshold
        );
        let mut work_list = index.variables().collect::<Vec<VarId>>();
        work_list.reverse();
        let mut n_added = 0;
        while let Some(var) = work_list.pop() {
            if index.n_occurrences(var) <= self.threshold {
                continue;
            }
            let new_var = self.split_var(index, var);
            n_added += 1;
            work_list.push(new_var);
        }
        n_added
    }

    fn split_var(&self, index: &mut OccurrenceIndex, var: VarId) -> VarId {
        let new_var = index.new_var();
        let connectors = vec![
            RcMut::new(Clause::new(vec![
                Literal::new(var, true),
                Literal::new(new_var, false),
            ])),
            RcMut::new(Clause::new(vec![
                Literal::new(var, false),
                Literal::new(new_var, true),
            ])),
        ];
        let mut kept = index.take_occurrences(var);
        let n_kept = self.threshold - connectors.len();
        assert!(
            kept.len() > n_kept,
            "variable {} has {} occurrence(s), which is not enough to be split",
            var,
            kept.len()
        );
        let moved = kept.split_off(n_kept);
        for clause in moved.iter() {
            let n_replaced = clause.borrow_mut().replace_var(var, new_var);
            assert!(
                n_replaced > 0,
                "clause {:?} is indexed by variable {} which it does not contain",
                clause,
                var
            );
        }
        let mut var_bucket = connectors.clone();
        var_bucket.append(&mut kept);
        let mut new_var_bucket = connectors;
        new_var_bucket.extend(moved);
        index.set_occurrences(var, var_bucket);
        index.set_occurrences(new_var, new_var_bucket);
        new_var
    }
}

/// Splits the variables of a formula until none of them occurs in more than `threshold` clauses.
///
/// This is a shortcut for [`VariableSplitter::new`] followed by [`VariableSplitter::normalize`].
pub fn normalize(formula: Formula, threshold: usize) -> Result<Formula> {
    VariableSplitter::new(threshold)?.normalize(formula)
}
