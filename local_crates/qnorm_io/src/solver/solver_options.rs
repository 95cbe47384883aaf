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

/// The options given to the external solver.
///
/// The options are translated into command line arguments by [`to_args`](Self::to_args).
/// The default options enable no decision limit, random decisions and a fresh random seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    /// The maximal number of decisions the solver may take before giving up
    pub decision_limit: Option<usize>,
    /// Whether the decision limit applies as a soft conflict limit for CEGAR
    pub soft_decision_limit: bool,
    /// Whether the VSIDS heuristic is used (if not, decisions are random)
    pub vsids: bool,
    /// Whether the CEGAR refinement search is enabled
    pub cegar: bool,
    /// Whether a fresh random seed is used for each run
    pub fresh_seed: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            decision_limit: None,
            soft_decision_limit: false,
            vsids: false,
            cegar: false,
            fresh_seed: true,
        }
    }
}

impl SolverOptions {
    /// Returns the options used to compare a formula with its normalized version.
    ///
    /// The VSIDS heuristic is used with a fixed seed, and the number of decisions is bounded.
    ///
    /// # Example
    ///
    /// ```
    /// # use qnorm_io::SolverOptions;
    /// let options = SolverOptions::for_check(1000);
    /// assert_eq!(Some(1000), options.decision_limit);
    /// assert!(options.vsids);
    /// ```
    pub fn for_check(decision_limit: usize) -> Self {
        SolverOptions {
            decision_limit: Some(decision_limit),
            soft_decision_limit: false,
            vsids: true,
            cegar: false,
            fresh_seed: false,
        }
    }

    /// Translates the options into the command line arguments of the solver.
    ///
    /// The formula path is not included.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-v", "1", "--debugging", "--sat_by_qbf"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<String>>();
        if let Some(l) = self.decision_limit {
            args.push("-l".to_string());
            args.push(l.to_string());
        }
        if self.soft_decision_limit {
            args.push("--cegar_soft_conflict_limit".to_string());
        }
        if self.cegar {
            args.push("--cegar".to_string());
        }
        if !self.vsids {
            args.push("--random_decisions".to_string());
        }
        if self.fresh_seed {
            args.push("--fresh_seed".to_string());
        }
        args
    }
}

impl std::fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}
