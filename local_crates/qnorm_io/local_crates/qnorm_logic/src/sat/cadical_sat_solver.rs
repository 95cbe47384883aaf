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

use super::sat_solver::MAYBE_TIMEOUT_MSG;
use crate::{Clause, ConsistencyCheckResult, Literal, SatSolver};
use anyhow::{anyhow, Context, Result};
use cadical::{Callbacks, Solver};

struct CadicalCallbacks;

impl Callbacks for CadicalCallbacks {}

/// The CaDiCaL SAT solver.
///
/// CaDiCaL is an efficient SAT solver written in C++.
/// It won first place in the SAT track of the SAT Race 2019 and second overall place.
pub struct CadicalSatSolver {
    solver: Solver<CadicalCallbacks>,
}

impl CadicalSatSolver {
    /// Builds a new instance of the CaDiCaL SAT solver.
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
        }
    }
}

impl Default for CadicalSatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CadicalSatSolver {
    fn add_clause(&mut self, clause: &Clause) {
        self.solver
            .add_clause(clause.as_literals().iter().map(internal_to_cadical))
    }

    fn n_vars(&self) -> usize {
        self.solver.max_variable() as usize
    }

    fn check_consistency_with(
        &mut self,
        assumptions: &[Literal],
    ) -> Result<ConsistencyCheckResult> {
        let cadical_assumptions = assumptions.iter().map(internal_to_cadical);
        match self.solver.solve_with(cadical_assumptions) {
            Some(true) => Ok(ConsistencyCheckResult::Sat(build_model(&self.solver))),
            Some(false) => Ok(ConsistencyCheckResult::Unsat),
            // kcov-ignore-start
            None => Err(anyhow!(MAYBE_TIMEOUT_MSG))
                .context("while checking consistency with the CaDiCaL SAT solver"),
            // kcov-ignore-end
        }
    }
}

#[inline(always)]
fn internal_to_cadical(lit: &Literal) -> i32 {
    lit.to_dimacs() as i32
}

fn build_model<T>(solver: &Solver<T>) -> Vec<Literal>
where
    T: Callbacks,
{
    (1..=solver.max_variable())
        .map(|i| match solver.value(i) {
            Some(true) => Literal::from((i as usize, true)),
            Some(false) | None => Literal::from((i as usize, false)),
        })
        .collect::<Vec<Literal>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(dimacs: &[isize]) -> Clause {
        Clause::from_dimacs(dimacs).unwrap()
    }

    #[test]
    fn test_cadical_sat() {
        let mut solver = CadicalSatSolver::new();
        solver.add_clause(&clause(&[-1, 2]));
        solver.add_clause(&clause(&[1, 3]));
        match solver.check_consistency().unwrap() {
            ConsistencyCheckResult::Sat(model) => {
                assert_eq!(3, model.len());
                assert!(model.contains(&(2, true).into()) || model.contains(&(3, true).into()));
            }
            _ => panic!(), // kcov-ignore
        }
    }

    #[test]
    fn test_sat_unit_prop() {
        let mut solver = CadicalSatSolver::new();
        solver.add_clause(&clause(&[-1]));
        solver.add_clause(&clause(&[1, -2]));
        match solver.check_consistency().unwrap() {
            ConsistencyCheckResult::Sat(model) => {
                assert_eq!(vec![Literal::from((1, false)), Literal::from((2, false))], model)
            }
            _ => panic!(), // kcov-ignore
        }
    }

    #[test]
    fn test_cadical_unsat() {
        let mut solver = CadicalSatSolver::new();
        solver.add_clause(&clause(&[-1, 2]));
        solver.add_clause(&clause(&[1, -2]));
        solver.add_clause(&clause(&[-1, -2]));
        solver.add_clause(&clause(&[1, 2]));
        // kcov-ignore-start
        assert!(matches!(
            solver.check_consistency().unwrap(),
            ConsistencyCheckResult::Unsat
        ))
        // kcov-ignore-end
    }

    #[test]
    fn test_multiple_calls() {
        let mut solver = CadicalSatSolver::new();
        solver.add_clause(&clause(&[-1, -2]));
        solver.add_clause(&clause(&[1, 2]));
        // kcov-ignore-start
        assert!(matches!(
            solver.check_consistency_with(&[(1, true).into()]).unwrap(),
            ConsistencyCheckResult::Sat(_)
        ));
        assert!(matches!(
            solver
                .check_consistency_with(&[(1, true).into(), (2, true).into()])
                .unwrap(),
            ConsistencyCheckResult::Unsat
        ));
        // kcov-ignore-end
    }
}
