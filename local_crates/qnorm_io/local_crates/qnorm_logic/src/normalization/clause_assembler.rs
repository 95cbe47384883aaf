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

use super::OccurrenceIndex;
use crate::{Clause, RcMut};
use rustc_hash::FxHashSet;

/// Rebuilds a clause list from an [`OccurrenceIndex`].
///
/// The clauses without literals come first.
/// The other clauses are then taken bucket by bucket, by ascending variable order;
/// a clause shared by several buckets is emitted once, at the position given by the lowest variable it contains.
/// Since the key used to detect shared clauses is their identity, two distinct clauses with the same literals are both kept.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{Clause, ClauseAssembler, OccurrenceIndex};
///
/// let clauses = vec![
///     Clause::from_dimacs(&[2, 3]).unwrap(),
///     Clause::from_dimacs(&[-1, 3]).unwrap(),
/// ];
/// let index = OccurrenceIndex::build(3, clauses);
/// let flat = ClauseAssembler::new().flatten(&index);
/// assert_eq!(
///     vec![vec![-1, 3], vec![2, 3]],
///     flat.iter().map(|c| c.to_dimacs()).collect::<Vec<Vec<isize>>>()
/// );
/// ```
#[derive(Default)]
pub struct ClauseAssembler;

impl ClauseAssembler {
    /// Builds a new assembler.
    pub fn new() -> Self {
        ClauseAssembler
    }

    /// Returns the clauses of the index, each of them once, in a deterministic order.
    pub fn flatten(&self, index: &OccurrenceIndex) -> Vec<Clause> {
        let mut emitted = FxHashSet::default();
        let mut clauses = Vec::new();
        let indexed = index
            .variables()
            .flat_map(|v| index.occurrences(v).iter());
        for clause in index.variable_free_clauses().iter().chain(indexed) {
            if emitted.insert(RcMut::as_ptr(clause)) {
                clauses.push(clause.borrow().clone());
            }
        }
        clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimacs(clauses: &[Clause]) -> Vec<Vec<isize>> {
        clauses.iter().map(|c| c.to_dimacs()).collect()
    }

    fn index(n_vars: usize, dimacs: &[&[isize]]) -> OccurrenceIndex {
        OccurrenceIndex::build(
            n_vars,
            dimacs
                .iter()
                .map(|c| Clause::from_dimacs(c).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_shared_clause_emitted_once() {
        let index = index(3, &[&[1, 2, 3]]);
        assert_eq!(vec![vec![1, 2, 3]], dimacs(&ClauseAssembler::new().flatten(&index)));
    }

    #[test]
    fn test_order_by_lowest_var() {
        let index = index(4, &[&[4, 3], &[3, -2], &[-4], &[2, 1]]);
        assert_eq!(
            vec![vec![2, 1], vec![3, -2], vec![4, 3], vec![-4]],
            dimacs(&ClauseAssembler::new().flatten(&index))
        );
    }

    #[test]
    fn test_duplicate_clauses_are_kept() {
        let index = index(2, &[&[1, 2], &[1, 2]]);
        assert_eq!(
            vec![vec![1, 2], vec![1, 2]],
            dimacs(&ClauseAssembler::new().flatten(&index))
        );
    }

    #[test]
    fn test_variable_free_clauses_first() {
        let index = index(2, &[&[1, 2], &[]]);
        assert_eq!(
            vec![vec![], vec![1, 2]],
            dimacs(&ClauseAssembler::new().flatten(&index))
        );
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let index = index(5, &[&[5, -1], &[2, 3], &[-3, 4, 1], &[-5, -4]]);
        let assembler = ClauseAssembler::new();
        assert_eq!(
            dimacs(&assembler.flatten(&index)),
            dimacs(&assembler.flatten(&index))
        );
    }

    #[test]
    fn test_flatten_sees_rewritten_clauses() {
        let index = index(3, &[&[1, 2]]);
        index.occurrences(2.into())[0]
            .borrow_mut()
            .replace_var(1.into(), 3.into());
        assert_eq!(vec![vec![3, 2]], dimacs(&ClauseAssembler::new().flatten(&index)));
    }
}
