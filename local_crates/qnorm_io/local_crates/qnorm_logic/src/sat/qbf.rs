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

use crate::{ConsistencyCheckResult, Formula, Literal, SatSolver};
use anyhow::{anyhow, Context, Result};

/// The maximal number of universal variables [`is_true_2qbf`] accepts to enumerate.
pub const MAX_UNIVERSALS: usize = 20;

/// Decides the truth value of a formula read as the 2QBF `∀U ∃E. φ`.
///
/// The universal assignments are enumerated, and each of them is checked by the SAT solver as a set of assumptions.
/// The formula is true if and only if no universal assignment makes the matrix unsatisfiable.
/// A formula without universal variables is true if and only if it is satisfiable.
///
/// The clauses of the formula are added to the solver, which should not contain any other clause.
/// An error is returned if the formula has more than [`MAX_UNIVERSALS`] universal variables.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{default_sat_solver, is_true_2qbf, Clause, Formula, VarId};
///
/// // forall 1, exists 2: (1 or 2) and (-1 or -2)
/// let clauses = vec![
///     Clause::from_dimacs(&[1, 2]).unwrap(),
///     Clause::from_dimacs(&[-1, -2]).unwrap(),
/// ];
/// let universals = vec![VarId::from(1)].into_iter().collect();
/// let formula = Formula::new(2, clauses, universals).unwrap();
/// assert!(is_true_2qbf(&formula, default_sat_solver().as_mut()).unwrap());
/// ```
pub fn is_true_2qbf(formula: &Formula, solver: &mut dyn SatSolver) -> Result<bool> {
    let universals = formula.universals().iter().copied().collect::<Vec<_>>();
    if universals.len() > MAX_UNIVERSALS {
        return Err(anyhow!(
            "cannot enumerate the assignments of {} universal variables (at most {} allowed)",
            universals.len(),
            MAX_UNIVERSALS
        ));
    }
    formula.clauses().iter().for_each(|c| solver.add_clause(c));
    for bits in 0u64..(1 << universals.len()) {
        let assumptions = universals
            .iter()
            .enumerate()
            .map(|(i, u)| Literal::new(*u, (bits >> i) & 1 == 1))
            .collect::<Vec<Literal>>();
        let result = solver
            .check_consistency_with(&assumptions)
            .context("while deciding the truth value of a 2QBF")?;
        if result == ConsistencyCheckResult::Unsat {
            return Ok(false);
        }
    }
    Ok(true)
}
