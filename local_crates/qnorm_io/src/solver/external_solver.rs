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

use super::{Evaluation, Measurement, SolverOptions, SolverStatus};
use anyhow::{anyhow, Context, Result};
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// An external QBF solver, invoked as a separate process.
///
/// The solver is called with the arguments given by [`SolverOptions::to_args`] followed by the path of the formula.
/// Its answer is given by its exit code, and its statistics are read from its standard output
/// (see [`Evaluation::from_output`]).
pub struct ExternalSolver {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl ExternalSolver {
    /// Builds a solver given the path to its executable.
    pub fn new(program: &Path) -> Self {
        ExternalSolver {
            program: program.to_path_buf(),
            leading_args: vec![],
        }
    }

    /// Builds a solver run through another program, like an interpreter or a resource limiter.
    ///
    /// The leading arguments are given before the solver options.
    pub fn with_leading_args(program: &Path, leading_args: Vec<String>) -> Self {
        ExternalSolver {
            program: program.to_path_buf(),
            leading_args,
        }
    }

    /// Runs the solver once on a formula.
    ///
    /// An error is returned if the process cannot be launched or if its output is malformed.
    /// A process reporting an unexpected exit code results in an [`SolverStatus::Error`] status, not in an error.
    pub fn evaluate(&self, formula_path: &Path, options: &SolverOptions) -> Result<Evaluation> {
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(options.to_args())
            .arg(formula_path)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("while running the solver {}", self.program.display()))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Evaluation::from_output(output.status.code(), &stdout, options.decision_limit)
            .with_context(|| format!("while evaluating {}", formula_path.display()))
    }

    /// Runs the solver several times on a formula and aggregates the results (see [`Measurement::from_evaluations`]).
    ///
    /// The runs stop at the first one which does not conclude.
    pub fn evaluate_repeated(
        &self,
        formula_path: &Path,
        options: &SolverOptions,
        repetitions: usize,
    ) -> Result<Measurement> {
        if repetitions == 0 {
            return Err(anyhow!("the number of repetitions must be positive"));
        }
        let mut evaluations = Vec::with_capacity(repetitions);
        for _ in 0..repetitions {
            let evaluation = self.evaluate(formula_path, options)?;
            evaluations.push(evaluation);
            if evaluation.status == SolverStatus::Timeout || evaluation.status == SolverStatus::Error
            {
                break;
            }
        }
        Measurement::from_evaluations(&evaluations)
            .with_context(|| format!("while measuring {}", formula_path.display()))
    }
}
