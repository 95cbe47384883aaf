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
    arg_decision_limit, arg_directory, arg_file_pattern, arg_max_occurrences, arg_solver,
    canonicalize, create_output, normalize_formula, read_decision_limit,
    read_directory_and_pattern, read_max_occurrences, read_qdimacs_file, ARG_SOLVER,
};
use anyhow::{anyhow, Context, Result};
use qnorm_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use qnorm_io::{
    default_sat_solver, is_true_2qbf, list_input_files, normalized_file_name, ExternalSolver,
    Formula, QdimacsWriter, SolverOptions,
};
use std::{fs, path::Path};

pub(crate) struct NormalizeDirCommand;

const CMD_NAME: &str = "normalize-dir";

const ARG_CHECK: &str = "CHECK";

const NORMALIZED_DIR: &str = "normalized";

const DEFAULT_CHECK_DECISION_LIMIT: usize = 1000;

/// The way normalized formulas are compared to the initial ones.
pub(crate) enum Checker {
    InProcess,
    External(ExternalSolver, SolverOptions),
}

impl NormalizeDirCommand {
    pub fn new() -> Self {
        NormalizeDirCommand
    }
}

impl<'a> Command<'a> for NormalizeDirCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Normalizes all the formulas of a directory, writing them into its \"normalized\" subdirectory.")
            .setting(AppSettings::DisableVersion)
            .arg(arg_directory())
            .arg(arg_file_pattern())
            .arg(arg_max_occurrences())
            .arg(
                Arg::with_name(ARG_CHECK)
                    .long("check")
                    .short("c")
                    .help("checks that the normalized formulas have the same truth value as the initial ones"),
            )
            .arg(arg_solver().requires(ARG_CHECK))
            .arg(arg_decision_limit().requires(ARG_SOLVER))
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let (directory, pattern) = read_directory_and_pattern(arg_matches)?;
        let threshold = read_max_occurrences(arg_matches)?;
        let checker = if arg_matches.is_present(ARG_CHECK) {
            Some(match arg_matches.value_of(ARG_SOLVER) {
                Some(s) => {
                    let decision_limit = read_decision_limit(arg_matches)?
                        .unwrap_or(DEFAULT_CHECK_DECISION_LIMIT);
                    Checker::External(
                        ExternalSolver::new(Path::new(s)),
                        SolverOptions::for_check(decision_limit),
                    )
                }
                None => Checker::InProcess,
            })
        } else {
            None
        };
        self.execute_internal(Path::new(directory), pattern, threshold, checker.as_ref())
    }
}

impl NormalizeDirCommand {
    fn execute_internal(
        &self,
        directory: &Path,
        pattern: &str,
        threshold: usize,
        checker: Option<&Checker>,
    ) -> Result<()> {
        let files = list_input_files(directory, pattern)?;
        info!("detected {} file(s)", files.len());
        let dest = directory.join(NORMALIZED_DIR);
        fs::create_dir_all(&dest)
            .with_context(|| format!("while creating directory {}", dest.display()))?;
        info!(
            "writing to directory {}",
            canonicalize(&dest.display().to_string())
        );
        for path in files.iter() {
            normalize_file(path, &dest, threshold, checker)
                .with_context(|| format!("while normalizing {}", path.display()))?;
        }
        Ok(())
    }
}

fn normalize_file(
    path: &Path,
    dest: &Path,
    threshold: usize,
    checker: Option<&Checker>,
) -> Result<()> {
    let formula = read_qdimacs_file(path)?;
    let normalized = normalize_formula(formula.clone(), threshold)?;
    let output_path = normalized_file_name(dest, path)?;
    let mut output = create_output(Some(&output_path.display().to_string()))?;
    QdimacsWriter::new().write(&normalized, output.as_mut())?;
    drop(output);
    match checker {
        None => Ok(()),
        Some(Checker::InProcess) => check_in_process(&formula, &normalized),
        Some(Checker::External(solver, options)) => {
            let initial = solver.evaluate(path, options)?;
            let result = solver.evaluate(&output_path, options)?;
            if !initial.agrees_with(&result) {
                return Err(anyhow!(
                    "the solver answers {} for the initial formula and {} for the normalized one",
                    initial.status,
                    result.status
                ));
            }
            info!(
                "check passed: the solver answers {} for the initial formula and {} for the normalized one",
                initial.status,
                result.status
            );
            Ok(())
        }
    }
}

fn check_in_process(formula: &Formula, normalized: &Formula) -> Result<()> {
    let truth_value = |b| if b { "true" } else { "false" };
    let initial = is_true_2qbf(formula, default_sat_solver().as_mut())?;
    let result = is_true_2qbf(normalized, default_sat_solver().as_mut())?;
    if initial != result {
        return Err(anyhow!(
            "the initial formula is {} but the normalized one is {}",
            truth_value(initial),
            truth_value(result)
        ));
    }
    info!("check passed: both formulas are {}", truth_value(initial));
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::tests::{assert_err_message, assert_log_message};
    use logtest::Logger;
    use qnorm_app_helper::Level;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const STAR_7: &str = "p cnf 7 6\n1 2 0\n1 3 0\n1 4 0\n1 5 0\n1 6 0\n1 7 0\n";
    const SMALL_2QBF: &str = "p cnf 2 2\na 1 0\n1 2 0\n-1 -2 0\n";

    pub(crate) fn logtest_normalize_dir(logger: &mut Logger) {
        logtest_execute_in_process_check(logger);
        logtest_execute_no_check_empty_dir(logger);
        if cfg!(unix) {
            logtest_execute_external_check(logger);
            logtest_execute_external_check_disagreement(logger);
        }
    }

    fn dir_with_files(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn canonical(path: &Path) -> String {
        canonicalize(&path.display().to_string())
    }

    fn assert_star_7_logs(logger: &mut Logger, input: &Path, output: &Path) {
        assert_log_message(
            logger,
            Level::Info,
            format!("reading input file {}", canonical(input)),
        );
        assert_log_message(
            logger,
            Level::Info,
            "formula has 7 variable(s) and 6 clause(s); a variable occurs in at most 6 clause(s)",
        );
        assert_log_message(logger, Level::Info, "added 1 variable(s)");
        assert_log_message(
            logger,
            Level::Info,
            "normalized formula has 8 variable(s) and 8 clause(s); a variable occurs in at most 5 clause(s)",
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("setting output file to {}", canonical(output)),
        );
    }

    fn logtest_execute_in_process_check(mut logger: &mut Logger) {
        let dir = dir_with_files(&[
            ("a.qdimacs", STAR_7),
            ("b.qdimacs", SMALL_2QBF),
            ("c.txt", "not a formula"),
        ]);
        NormalizeDirCommand::new()
            .execute_internal(dir.path(), "*.qdimacs", 5, Some(&Checker::InProcess))
            .unwrap();
        let dest = dir.path().join("normalized");
        let mut outputs = fs::read_dir(&dest)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect::<Vec<PathBuf>>();
        outputs.sort();
        assert_eq!(
            vec![dest.join("a.n.qdimacs"), dest.join("b.n.qdimacs")],
            outputs
        );
        assert_eq!(
            SMALL_2QBF.replace("a 1 0\n", "a 1 0\ne 2 0\n"),
            fs::read_to_string(dest.join("b.n.qdimacs")).unwrap()
        );
        assert_log_message(&mut logger, Level::Info, "detected 2 file(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("writing to directory {}", canonical(&dest)),
        );
        assert_star_7_logs(
            &mut logger,
            &dir.path().join("a.qdimacs"),
            &dest.join("a.n.qdimacs"),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "check passed: both formulas are true",
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!(
                "reading input file {}",
                canonical(&dir.path().join("b.qdimacs"))
            ),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "formula has 2 variable(s) and 2 clause(s); a variable occurs in at most 2 clause(s)",
        );
        assert_log_message(&mut logger, Level::Info, "added 0 variable(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            "normalized formula has 2 variable(s) and 2 clause(s); a variable occurs in at most 2 clause(s)",
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!(
                "setting output file to {}",
                canonical(&dest.join("b.n.qdimacs"))
            ),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "check passed: both formulas are true",
        );
        assert!(logger.pop().is_none());
    }

    fn logtest_execute_no_check_empty_dir(mut logger: &mut Logger) {
        let dir = dir_with_files(&[("c.txt", "not a formula")]);
        NormalizeDirCommand::new()
            .execute_internal(dir.path(), "*.qdimacs", 10, None)
            .unwrap();
        let dest = dir.path().join("normalized");
        assert_eq!(0, fs::read_dir(&dest).unwrap().count());
        assert_log_message(&mut logger, Level::Info, "detected 0 file(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("writing to directory {}", canonical(&dest)),
        );
        assert!(logger.pop().is_none());
    }

    fn fake_solver(dir: &TempDir) -> ExternalSolver {
        let script = dir.path().join("solver.sh");
        fs::write(
            &script,
            "for f; do :; done\necho ' Conflicts: 1'\necho ' Decisions: 2'\ncase \"$f\" in\n  *.n.qdimacs) exit 10;;\n  *) exit 20;;\nesac\n",
        )
        .unwrap();
        ExternalSolver::with_leading_args(
            Path::new("/bin/sh"),
            vec![script.display().to_string()],
        )
    }

    fn fake_solver_with_timeout(dir: &TempDir) -> ExternalSolver {
        let script = dir.path().join("solver.sh");
        fs::write(
            &script,
            "for f; do :; done\necho ' Conflicts: 1'\necho ' Decisions: 2'\ncase \"$f\" in\n  *.n.qdimacs) exit 30;;\n  *) exit 10;;\nesac\n",
        )
        .unwrap();
        ExternalSolver::with_leading_args(
            Path::new("/bin/sh"),
            vec![script.display().to_string()],
        )
    }

    fn logtest_execute_external_check(mut logger: &mut Logger) {
        let dir = dir_with_files(&[("a.qdimacs", STAR_7)]);
        let checker = Checker::External(
            fake_solver_with_timeout(&dir),
            SolverOptions::for_check(1000),
        );
        NormalizeDirCommand::new()
            .execute_internal(dir.path(), "*.qdimacs", 5, Some(&checker))
            .unwrap();
        let dest = dir.path().join("normalized");
        assert_log_message(&mut logger, Level::Info, "detected 1 file(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("writing to directory {}", canonical(&dest)),
        );
        assert_star_7_logs(
            &mut logger,
            &dir.path().join("a.qdimacs"),
            &dest.join("a.n.qdimacs"),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "check passed: the solver answers SAT for the initial formula and TIMEOUT for the normalized one",
        );
        assert!(logger.pop().is_none());
    }

    fn logtest_execute_external_check_disagreement(mut logger: &mut Logger) {
        let dir = dir_with_files(&[("a.qdimacs", STAR_7)]);
        let checker = Checker::External(fake_solver(&dir), SolverOptions::for_check(1000));
        let error = NormalizeDirCommand::new()
            .execute_internal(dir.path(), "*.qdimacs", 5, Some(&checker))
            .unwrap_err();
        assert_err_message(
            vec![
                format!("while normalizing {}", dir.path().join("a.qdimacs").display()),
                "the solver answers UNSAT for the initial formula and SAT for the normalized one"
                    .to_string(),
            ],
            error,
        );
        let dest = dir.path().join("normalized");
        assert_log_message(&mut logger, Level::Info, "detected 1 file(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("writing to directory {}", canonical(&dest)),
        );
        assert_star_7_logs(
            &mut logger,
            &dir.path().join("a.qdimacs"),
            &dest.join("a.n.qdimacs"),
        );
        assert!(logger.pop().is_none());
    }
}
