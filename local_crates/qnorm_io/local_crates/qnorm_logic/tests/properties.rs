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

use proptest::prelude::*;
use qnorm_logic::{is_true_2qbf, normalize, CadicalSatSolver, Clause, Formula, VarId};
use std::collections::BTreeSet;

fn arb_formula() -> impl Strategy<Value = Formula> {
    (1usize..=6).prop_flat_map(|n_vars| {
        let literal = (1..=n_vars as isize, any::<bool>())
            .prop_map(|(v, polarity)| if polarity { v } else { -v });
        let clauses = prop::collection::vec(prop::collection::vec(literal, 0..=4), 0..=24);
        let universal_mask = prop::collection::vec(any::<bool>(), n_vars);
        (Just(n_vars), clauses, universal_mask).prop_map(|(n_vars, clauses, universal_mask)| {
            let clauses = clauses
                .iter()
                .map(|c| Clause::from_dimacs(c).unwrap())
                .collect();
            let universals = (1..=n_vars)
                .filter(|v| universal_mask[v - 1])
                .map(VarId::from)
                .collect();
            Formula::new(n_vars, clauses, universals).unwrap()
        })
    })
}

fn is_true(formula: &Formula) -> bool {
    is_true_2qbf(formula, &mut CadicalSatSolver::new()).unwrap()
}

fn sorted_dimacs(formula: &Formula) -> Vec<Vec<isize>> {
    let mut clauses = formula
        .clauses()
        .iter()
        .map(|c| c.to_dimacs())
        .collect::<Vec<Vec<isize>>>();
    clauses.sort();
    clauses
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_occurrences_are_bounded(formula in arb_formula(), threshold in 5usize..=8) {
        let normalized = normalize(formula, threshold).unwrap();
        prop_assert!(normalized.max_occurrences() <= threshold);
    }

    #[test]
    fn prop_truth_value_is_kept(formula in arb_formula(), threshold in 5usize..=8) {
        let normalized = normalize(formula.clone(), threshold).unwrap();
        prop_assert_eq!(is_true(&formula), is_true(&normalized));
    }

    #[test]
    fn prop_quantifiers_are_kept(formula in arb_formula(), threshold in 5usize..=8) {
        let normalized = normalize(formula.clone(), threshold).unwrap();
        prop_assert!(normalized.n_vars() >= formula.n_vars());
        prop_assert_eq!(formula.universals(), normalized.universals());
    }

    #[test]
    fn prop_clause_count(formula in arb_formula(), threshold in 5usize..=8) {
        let normalized = normalize(formula.clone(), threshold).unwrap();
        let n_new_vars = normalized.n_vars() - formula.n_vars();
        prop_assert_eq!(formula.n_clauses() + 2 * n_new_vars, normalized.n_clauses());
    }

    #[test]
    fn prop_no_op_under_threshold(formula in arb_formula(), threshold in 5usize..=8) {
        prop_assume!(formula.max_occurrences() <= threshold);
        let normalized = normalize(formula.clone(), threshold).unwrap();
        prop_assert_eq!(formula.n_vars(), normalized.n_vars());
        prop_assert_eq!(sorted_dimacs(&formula), sorted_dimacs(&normalized));
    }

    #[test]
    fn prop_deterministic(formula in arb_formula(), threshold in 5usize..=8) {
        let first = normalize(formula.clone(), threshold).unwrap();
        let second = normalize(formula, threshold).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_new_vars_are_existential() {
    let clauses = (2..=30)
        .map(|v| Clause::from_dimacs(&[1, v]).unwrap())
        .collect();
    let universals: BTreeSet<VarId> = vec![VarId::from(1)].into_iter().collect();
    let formula = Formula::new(30, clauses, universals).unwrap();
    let normalized = normalize(formula, 5).unwrap();
    assert!(normalized.n_vars() > 30);
    assert!((31..=normalized.n_vars()).all(|v| !normalized.is_universal(v.into())));
}
