// qnorm
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

use super::{
    arg_decision_limit, arg_directory, arg_file_pattern, arg_solver, canonicalize,
    read_decision_limit, read_directory_and_pattern, ARG_SOLVER,
};
use anyhow::{Context, Result};
use qnorm_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use qnorm_io::{list_input_files, ExternalSolver, SolverOptions, Statistics};
use std::{fs, path::Path};

pub(crate) struct MeasureCommand;

const CMD_NAME: &str = "measure";

const ARG_REPETITIONS: &str = "REPETITIONS";
const ARG_VSIDS: &str = "VSIDS";
const ARG_CEGAR: &str = "CEGAR";

const STATISTICS_FILE: &str = "STATISTICS";

impl MeasureCommand {
    pub fn new() -> Self {
        MeasureCommand
    }
}

impl<'a> Command<'a> for MeasureCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Measures the conflicts and decisions of an external solver on the formulas of a directory.")
            .setting(AppSettings::DisableVersion)
            .arg(arg_solver().required(true))
            .arg(arg_directory())
            .arg(arg_file_pattern())
            .arg(
                Arg::with_name(ARG_REPETITIONS)
                    .long("repetitions")
                    .short("r")
                    .takes_value(true)
                    .default_value("1")
                    .help("sets the number of runs to build the average over"),
            )
            .arg(
                Arg::with_name(ARG_VSIDS)
                    .long("vsids")
                    .help("uses the VSIDS heuristic instead of random decisions"),
            )
            .arg(
                Arg::with_name(ARG_CEGAR)
                    .long("cegar")
                    .help("enables the CEGAR refinement search"),
            )
            .arg(arg_decision_limit())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let (directory, pattern) = read_directory_and_pattern(arg_matches)?;
        let solver_path = arg_matches.value_of(ARG_SOLVER).context("missing solver")?;
        let str_repetitions = arg_matches
            .value_of(ARG_REPETITIONS)
            .context("missing number of repetitions")?;
        let repetitions = str_repetitions
            .parse::<usize>()
            .with_context(|| format!(r#"invalid number of repetitions "{}""#, str_repetitions))?;
        let options = SolverOptions {
            decision_limit: read_decision_limit(arg_matches)?,
            vsids: arg_matches.is_present(ARG_VSIDS),
            cegar: arg_matches.is_present(ARG_CEGAR),
            ..SolverOptions::default()
        };
        let invocation = std::env::args().collect::<Vec<String>>().join(" ");
        self.execute_internal(
            Path::new(directory),
            pattern,
            &ExternalSolver::new(Path::new(solver_path)),
            &options,
            repetitions,
            &invocation,
        )
    }
}

impl MeasureCommand {
    fn execute_internal(
        &self,
        directory: &Path,
        pattern: &str,
        solver: &ExternalSolver,
        options: &SolverOptions,
        repetitions: usize,
        invocation: &str,
    ) -> Result<()> {
        let files = list_input_files(directory, pattern)?;
        info!("detected {} file(s)", files.len());
        let mut conflicts = vec![];
        let mut decisions = vec![];
        for path in files.iter() {
            info!("running {}", path.display());
            let measurement = solver.evaluate_repeated(path, options, repetitions)?;
            match measurement.conflicts {
                Some(c) => {
                    info!(
                        "{}: {} conflict(s) and {} decision(s) on average",
                        measurement.status, c, measurement.decisions
                    );
                    conflicts.push(c);
                }
                None => info!(
                    "{} after {} decision(s)",
                    measurement.status, measurement.decisions
                ),
            }
            decisions.push(measurement.decisions);
        }
        let conflict_stats = Statistics::from_samples(&conflicts);
        let decision_stats = Statistics::from_samples(&decisions);
        let stats_path = directory.join(STATISTICS_FILE);
        let content = format!(
            "{}\ndirectory: {}, file pattern: {}, repetitions: {}, solver options: {}\n\nAvg conflicts: {}\nVar conflicts: {}\n\n\nAvg decisions: {}\nVar decisions: {}\n",
            invocation,
            directory.display(),
            pattern,
            repetitions,
            options,
            conflict_stats.mean,
            conflict_stats.variance,
            decision_stats.mean,
            decision_stats.variance
        );
        fs::write(&stats_path, content)
            .with_context(|| format!("while writing file {}", stats_path.display()))?;
        info!(
            "writing statistics to {}",
            canonicalize(&stats_path.display().to_string())
        );
        Ok(())
    }
}
