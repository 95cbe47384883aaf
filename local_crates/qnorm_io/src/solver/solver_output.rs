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

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONFLICTS_PATTERN: Regex = Regex::new(r" Conflicts: (\d+)").unwrap();
    static ref DECISIONS_PATTERN: Regex = Regex::new(r" Decisions: (\d+)").unwrap();
}

const EXIT_CODE_SAT: i32 = 10;
const EXIT_CODE_UNSAT: i32 = 20;
const EXIT_CODE_TIMEOUT: i32 = 30;

/// The answer of the external solver, as given by its exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    /// The formula is true (exit code 10)
    Sat,
    /// The formula is false (exit code 20)
    Unsat,
    /// A limit was reached (exit code 30)
    Timeout,
    /// Any other exit code, or a termination by a signal
    Error,
}

impl SolverStatus {
    /// Builds a status from a process exit code.
    ///
    /// # Example
    ///
    /// ```
    /// # use qnorm_io::SolverStatus;
    /// assert_eq!(SolverStatus::Unsat, SolverStatus::from_exit_code(Some(20)));
    /// assert_eq!(SolverStatus::Error, SolverStatus::from_exit_code(None));
    /// ```
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(EXIT_CODE_SAT) => SolverStatus::Sat,
            Some(EXIT_CODE_UNSAT) => SolverStatus::Unsat,
            Some(EXIT_CODE_TIMEOUT) => SolverStatus::Timeout,
            _ => SolverStatus::Error,
        }
    }

    /// Returns `true` if two answers do not contradict each other.
    ///
    /// Two answers agree if they are equal or if one of them is a timeout.
    /// An error never agrees with anything.
    pub fn agrees_with(&self, other: &SolverStatus) -> bool {
        match (self, other) {
            (SolverStatus::Error, _) | (_, SolverStatus::Error) => false,
            (SolverStatus::Timeout, _) | (_, SolverStatus::Timeout) => true,
            (s, o) => s == o,
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolverStatus::Sat => "SAT",
            SolverStatus::Unsat => "UNSAT",
            SolverStatus::Timeout => "TIMEOUT",
            SolverStatus::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}

/// The result of a single run of the external solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// The answer
    pub status: SolverStatus,
    /// The number of conflicts (`0` if the run did not conclude)
    pub conflicts: usize,
    /// The number of decisions (the decision limit in case of a timeout)
    pub decisions: usize,
}

impl Evaluation {
    /// Builds an evaluation from the exit code and the standard output of the solver.
    ///
    /// When the solver concludes, the output must contain exactly one conflict count and one decision count.
    /// A decision count exceeding the decision limit is an error.
    ///
    /// # Example
    ///
    /// ```
    /// # use qnorm_io::{Evaluation, SolverStatus};
    /// let output = "c Stats:\n Conflicts: 12\n Decisions: 40\n";
    /// let evaluation = Evaluation::from_output(Some(10), output, Some(1000)).unwrap();
    /// assert_eq!(SolverStatus::Sat, evaluation.status);
    /// assert_eq!(12, evaluation.conflicts);
    /// assert_eq!(40, evaluation.decisions);
    /// ```
    pub fn from_output(
        exit_code: Option<i32>,
        stdout: &str,
        decision_limit: Option<usize>,
    ) -> Result<Self> {
        let status = SolverStatus::from_exit_code(exit_code);
        match status {
            SolverStatus::Sat | SolverStatus::Unsat => {
                let conflicts = read_count(&CONFLICTS_PATTERN, "conflict", stdout)?;
                let decisions = read_count(&DECISIONS_PATTERN, "decision", stdout)?;
                if let Some(l) = decision_limit {
                    if decisions > l {
                        return Err(anyhow!(
                            "the solver made {} decisions, exceeding the limit of {}",
                            decisions,
                            l
                        ));
                    }
                }
                Ok(Evaluation {
                    status,
                    conflicts,
                    decisions,
                })
            }
            SolverStatus::Timeout => Ok(Evaluation {
                status,
                conflicts: 0,
                decisions: decision_limit.unwrap_or(0),
            }),
            SolverStatus::Error => Ok(Evaluation {
                status,
                conflicts: 0,
                decisions: 0,
            }),
        }
    }

    /// Returns `true` if the statuses of two evaluations agree (see [`SolverStatus::agrees_with`]).
    pub fn agrees_with(&self, other: &Evaluation) -> bool {
        self.status.agrees_with(&other.status)
    }
}

fn read_count(pattern: &Regex, name: &str, stdout: &str) -> Result<usize> {
    let counts = pattern
        .captures_iter(stdout)
        .map(|c| c[1].to_string())
        .collect::<Vec<String>>();
    match counts.as_slice() {
        [c] => c
            .parse::<usize>()
            .with_context(|| format!("while parsing the {} count", name)),
        _ => Err(anyhow!(
            "expected exactly one {} count in the solver output, found {}",
            name,
            counts.len()
        )),
    }
}

/// The aggregated result of several runs of the external solver on the same formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// The common answer of the runs
    pub status: SolverStatus,
    /// The average number of conflicts, unknown if a run timed out
    pub conflicts: Option<f64>,
    /// The average number of decisions
    pub decisions: f64,
}

impl Measurement {
    /// Aggregates the evaluations of several runs.
    ///
    /// If a run timed out, the measurement is a timeout: its conflict count is unknown and its decision count is the one of this run.
    /// Otherwise, all the runs must give the same answer, and the conflicts and decisions are averaged.
    /// An error is returned if no evaluation is given, if one of them is an error, or if the answers differ.
    ///
    /// # Example
    ///
    /// ```
    /// # use qnorm_io::{Evaluation, Measurement, SolverStatus};
    /// let evaluations = vec![
    ///     Evaluation { status: SolverStatus::Sat, conflicts: 2, decisions: 10 },
    ///     Evaluation { status: SolverStatus::Sat, conflicts: 4, decisions: 20 },
    /// ];
    /// let measurement = Measurement::from_evaluations(&evaluations).unwrap();
    /// assert_eq!(Some(3.), measurement.conflicts);
    /// assert_eq!(15., measurement.decisions);
    /// ```
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Result<Self> {
        let first = evaluations
            .first()
            .ok_or_else(|| anyhow!("cannot aggregate an empty set of evaluations"))?;
        if evaluations.iter().any(|e| e.status == SolverStatus::Error) {
            return Err(anyhow!("the solver returned an error"));
        }
        if let Some(e) = evaluations
            .iter()
            .find(|e| e.status == SolverStatus::Timeout)
        {
            return Ok(Measurement {
                status: SolverStatus::Timeout,
                conflicts: None,
                decisions: e.decisions as f64,
            });
        }
        if let Some(e) = evaluations.iter().find(|e| e.status != first.status) {
            return Err(anyhow!(
                "the solver gave different answers ({} and {})",
                first.status,
                e.status
            ));
        }
        let n = evaluations.len() as f64;
        Ok(Measurement {
            status: first.status,
            conflicts: Some(evaluations.iter().map(|e| e.conflicts as f64).sum::<f64>() / n),
            decisions: evaluations.iter().map(|e| e.decisions as f64).sum::<f64>() / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(status: SolverStatus, conflicts: usize, decisions: usize) -> Evaluation {
        Evaluation {
            status,
            conflicts,
            decisions,
        }
    }

    #[test]
    fn test_status_from_exit_code() {
        assert_eq!(SolverStatus::Sat, SolverStatus::from_exit_code(Some(10)));
        assert_eq!(SolverStatus::Unsat, SolverStatus::from_exit_code(Some(20)));
        assert_eq!(SolverStatus::Timeout, SolverStatus::from_exit_code(Some(30)));
        assert_eq!(SolverStatus::Error, SolverStatus::from_exit_code(Some(0)));
        assert_eq!(SolverStatus::Error, SolverStatus::from_exit_code(Some(1)));
    }

    #[test]
    fn test_agreement() {
        use SolverStatus::*;
        assert!(Sat.agrees_with(&Sat));
        assert!(Unsat.agrees_with(&Unsat));
        assert!(!Sat.agrees_with(&Unsat));
        assert!(Sat.agrees_with(&Timeout));
        assert!(Timeout.agrees_with(&Unsat));
        assert!(Timeout.agrees_with(&Timeout));
        assert!(!Error.agrees_with(&Error));
        assert!(!Timeout.agrees_with(&Error));
    }

    #[test]
    fn test_unsat_output() {
        let output = "some log\n Conflicts: 0\n Decisions: 3\nUNSAT\n";
        assert_eq!(
            evaluation(SolverStatus::Unsat, 0, 3),
            Evaluation::from_output(Some(20), output, None).unwrap()
        );
    }

    #[test]
    fn test_timeout_output() {
        assert_eq!(
            evaluation(SolverStatus::Timeout, 0, 1000),
            Evaluation::from_output(Some(30), "", Some(1000)).unwrap()
        );
    }

    #[test]
    fn test_error_output() {
        assert_eq!(
            evaluation(SolverStatus::Error, 0, 0),
            Evaluation::from_output(Some(1), "crash", Some(1000)).unwrap()
        );
    }

    #[test]
    fn test_missing_count() {
        assert_eq!(
            "expected exactly one decision count in the solver output, found 0",
            Evaluation::from_output(Some(10), " Conflicts: 1\n", None)
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn test_repeated_count() {
        assert_eq!(
            "expected exactly one conflict count in the solver output, found 2",
            Evaluation::from_output(Some(10), " Conflicts: 1\n Conflicts: 2\n", None)
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn test_decision_limit_violated() {
        assert_eq!(
            "the solver made 11 decisions, exceeding the limit of 10",
            Evaluation::from_output(Some(10), " Conflicts: 1\n Decisions: 11\n", Some(10))
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn test_measurement_no_evaluation() {
        assert!(Measurement::from_evaluations(&[]).is_err());
    }

    #[test]
    fn test_measurement_timeout() {
        let measurement = Measurement::from_evaluations(&[
            evaluation(SolverStatus::Sat, 1, 1),
            evaluation(SolverStatus::Timeout, 0, 100),
        ])
        .unwrap();
        assert_eq!(SolverStatus::Timeout, measurement.status);
        assert_eq!(None, measurement.conflicts);
        assert_eq!(100., measurement.decisions);
    }

    #[test]
    fn test_measurement_different_answers() {
        assert_eq!(
            "the solver gave different answers (SAT and UNSAT)",
            Measurement::from_evaluations(&[
                evaluation(SolverStatus::Sat, 1, 1),
                evaluation(SolverStatus::Unsat, 1, 1),
            ])
            .unwrap_err()
            .to_string()
        );
    }

    #[test]
    fn test_measurement_error() {
        assert_eq!(
            "the solver returned an error",
            Measurement::from_evaluations(&[evaluation(SolverStatus::Error, 0, 0)])
                .unwrap_err()
                .to_string()
        );
    }
}
