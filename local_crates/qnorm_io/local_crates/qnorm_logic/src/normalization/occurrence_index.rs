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

use crate::{Clause, RcMut, VarId};
use rustc_hash::FxHashMap;

/// An index giving, for each variable, the clauses it occurs in.
///
/// Each clause is stored once in the bucket of each distinct variable it mentions.
/// Buckets do not own copies of the clauses but [`RcMut`] handles on them,
/// so that a clause rewritten through the bucket of one variable is seen rewritten from the buckets of the others.
///
/// Clauses without literals do not belong to any bucket; they are kept aside as variable-free clauses.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{Clause, OccurrenceIndex, RcMut, VarId};
///
/// let clauses = vec![
///     Clause::from_dimacs(&[1, 2]).unwrap(),
///     Clause::from_dimacs(&[-1, 3]).unwrap(),
/// ];
/// let index = OccurrenceIndex::build(3, clauses);
/// assert_eq!(2, index.n_occurrences(VarId::from(1)));
/// assert!(RcMut::ptr_eq(
///     &index.occurrences(VarId::from(1))[1],
///     &index.occurrences(VarId::from(3))[0],
/// ));
/// ```
pub struct OccurrenceIndex {
    n_vars: usize,
    buckets: FxHashMap<VarId, Vec<RcMut<Clause>>>,
    variable_free: Vec<RcMut<Clause>>,
}

impl OccurrenceIndex {
    /// Builds the occurrence index of a set of clauses over the variables `[1, n_vars]`.
    ///
    /// The clauses are moved into the index, not copied.
    /// If a clause refers to a variable higher than `n_vars`, the index grows to include it.
    /// Only the variables occurring in a clause get a bucket.
    pub fn build(n_vars: usize, clauses: Vec<Clause>) -> Self {
        let mut index = OccurrenceIndex {
            n_vars,
            buckets: FxHashMap::default(),
            variable_free: Vec::new(),
        };
        for clause in clauses {
            let vars = clause.variables();
            let shared = RcMut::new(clause);
            if vars.is_empty() {
                index.variable_free.push(shared);
                continue;
            }
            for v in vars {
                index.n_vars = index.n_vars.max(usize::from(v));
                index
                    .buckets
                    .entry(v)
                    .or_default()
                    .push(RcMut::clone(&shared));
            }
        }
        index
    }

    /// Returns the highest variable of the index.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the clauses the variable occurs in.
    ///
    /// Unknown variables have no occurrence.
    pub fn occurrences(&self, var_id: VarId) -> &[RcMut<Clause>] {
        match self.buckets.get(&var_id) {
            Some(b) => b.as_slice(),
            None => &[],
        }
    }

    /// Returns the number of clauses the variable occurs in.
    pub fn n_occurrences(&self, var_id: VarId) -> usize {
        self.occurrences(var_id).len()
    }

    /// Returns the highest number of clauses a single variable occurs in.
    pub fn max_occurrences(&self) -> usize {
        self.buckets.values().map(|b| b.len()).max().unwrap_or(0)
    }

    /// Iterates over the variables that occur in at least one clause, in ascending order.
    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        let mut vars = self
            .buckets
            .iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(v, _)| *v)
            .collect::<Vec<VarId>>();
        vars.sort_unstable();
        vars.into_iter()
    }

    /// Returns the clauses which do not contain any literal.
    pub fn variable_free_clauses(&self) -> &[RcMut<Clause>] {
        &self.variable_free
    }

    /// Allocates a new variable, with an empty bucket, and returns it.
    pub(crate) fn new_var(&mut self) -> VarId {
        self.n_vars += 1;
        let var_id = VarId::from(self.n_vars);
        self.buckets.insert(var_id, Vec::new());
        var_id
    }

    /// Removes the bucket of a variable, leaving it empty.
    pub(crate) fn take_occurrences(&mut self, var_id: VarId) -> Vec<RcMut<Clause>> {
        self.buckets.remove(&var_id).unwrap_or_default()
    }

    pub(crate) fn set_occurrences(&mut self, var_id: VarId, bucket: Vec<RcMut<Clause>>) {
        self.buckets.insert(var_id, bucket);
    }
}
