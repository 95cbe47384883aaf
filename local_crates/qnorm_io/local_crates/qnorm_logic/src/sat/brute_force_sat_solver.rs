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

use crate::{Clause, ConsistencyCheckResult, Literal, SatSolver};
use anyhow::{anyhow, Result};

/// The maximal number of unassigned variables the [`BruteForceSatSolver`] accepts to enumerate.
pub const MAX_BRUTE_FORCE_VARS: usize = 24;

/// A SAT solver that enumerates all the assignments of the variables.
///
/// This solver is only usable on tiny formulas.
/// It is provided as a reference to cross-check the results of other solvers:
/// it does not rely on any external library.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{BruteForceSatSolver, Clause, ConsistencyCheckResult, SatSolver};
///
/// let mut solver = BruteForceSatSolver::default();
/// solver.add_clause(&Clause::from_dimacs(&[1]).unwrap());
/// solver.add_clause(&Clause::from_dimacs(&[-1]).unwrap());
/// assert_eq!(ConsistencyCheckResult::Unsat, solver.check_consistency().unwrap());
/// ```
#[derive(Default)]
pub struct BruteForceSatSolver {
    n_vars: usize,
    clauses: Vec<Clause>,
}

impl SatSolver for BruteForceSatSolver {
    fn add_clause(&mut self, clause: &Clause) {
        if let Some(max) = clause
            .as_literals()
            .iter()
            .map(|l| usize::from(l.var_id()))
            .max()
        {
            self.n_vars = usize::max(self.n_vars, max);
        }
        self.clauses.push(clause.clone());
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn check_consistency_with(
        &mut self,
        assumptions: &[Literal],
    ) -> Result<ConsistencyCheckResult> {
        let n_vars = assumptions
            .iter()
            .map(|l| usize::from(l.var_id()))
            .fold(self.n_vars, usize::max);
        let mut fixed: Vec<Option<bool>> = vec![None; n_vars + 1];
        for l in assumptions {
            let v = usize::from(l.var_id());
            match fixed[v] {
                Some(p) if p != l.polarity() => return Ok(ConsistencyCheckResult::Unsat),
                _ => fixed[v] = Some(l.polarity()),
            }
        }
        let free_vars = (1..=n_vars)
            .filter(|v| fixed[*v].is_none())
            .collect::<Vec<usize>>();
        if free_vars.len() > MAX_BRUTE_FORCE_VARS {
            return Err(anyhow!(
                "cannot enumerate the assignments of {} variables (at most {} allowed)",
                free_vars.len(),
                MAX_BRUTE_FORCE_VARS
            ));
        }
        let mut assignment = fixed
            .iter()
            .map(|p| p.unwrap_or(false))
            .collect::<Vec<bool>>();
        for bits in 0u64..(1 << free_vars.len()) {
            for (i, v) in free_vars.iter().enumerate() {
                assignment[*v] = (bits >> i) & 1 == 1;
            }
            if self.clauses.iter().all(|c| c.is_satisfied_by(&assignment)) {
                let model = (1..=n_vars)
                    .map(|v| Literal::from((v, assignment[v])))
                    .collect();
                return Ok(ConsistencyCheckResult::Sat(model));
            }
        }
        Ok(ConsistencyCheckResult::Unsat)
    }
}
