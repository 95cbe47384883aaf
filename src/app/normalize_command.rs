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
    arg_input, arg_max_occurrences, arg_output, create_output, input_path, normalize_formula,
    output_path, read_max_occurrences, read_qdimacs_file,
};
use anyhow::Result;
use qnorm_app_helper::{App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use qnorm_io::QdimacsWriter;
use std::path::Path;

pub(crate) struct NormalizeCommand;

const CMD_NAME: &str = "normalize";

const ARG_COMMENT: &str = "COMMENT";

impl NormalizeCommand {
    pub fn new() -> Self {
        NormalizeCommand
    }
}

impl<'a> Command<'a> for NormalizeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Bounds the number of occurrences of the variables of a QDIMACS formula.")
            .setting(AppSettings::DisableVersion)
            .arg(arg_input())
            .arg(arg_output())
            .arg(arg_max_occurrences())
            .arg(
                Arg::with_name(ARG_COMMENT)
                    .long("comment")
                    .takes_value(true)
                    .help("sets a comment to write at the top of the output"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let threshold = read_max_occurrences(arg_matches)?;
        self.execute_internal(
            input_path(arg_matches)?,
            output_path(arg_matches),
            threshold,
            arg_matches.value_of(ARG_COMMENT),
        )
    }
}

impl NormalizeCommand {
    fn execute_internal(
        &self,
        input: &str,
        output: Option<&str>,
        threshold: usize,
        comment: Option<&str>,
    ) -> Result<()> {
        let formula = read_qdimacs_file(Path::new(input))?;
        let normalized = normalize_formula(formula, threshold)?;
        let mut writer = QdimacsWriter::new();
        if let Some(c) = comment {
            writer.set_comment(c);
        }
        let mut out = create_output(output)?;
        writer.write(&normalized, out.as_mut())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::{
        canonicalize,
        tests::{assert_err_message, assert_log_message},
    };
    use logtest::Logger;
    use qnorm_app_helper::Level;
    use std::{fs, io::Write};
    use tempfile::NamedTempFile;

    const STAR_7: &str = "p cnf 7 6\n1 2 0\n1 3 0\n1 4 0\n1 5 0\n1 6 0\n1 7 0\n";

    pub(crate) fn logtest_normalize(logger: &mut Logger) {
        logtest_execute_split(logger);
        logtest_execute_no_split(logger);
        logtest_execute_threshold_too_low(logger);
        logtest_execute_threshold_too_low_to_split(logger);
    }

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn logtest_execute_split(mut logger: &mut Logger) {
        let input = input_file(STAR_7);
        let input_path = format!("{}", input.path().display());
        let output = NamedTempFile::new().unwrap();
        let output_path = format!("{}", output.path().display());
        NormalizeCommand::new()
            .execute_internal(&input_path, Some(&output_path), 5, Some("normalized"))
            .unwrap();
        assert_eq!(
            "c normalized\np cnf 8 8\n1 -8 0\n-1 8 0\n1 2 0\n1 3 0\n1 4 0\n8 5 0\n8 6 0\n8 7 0\n",
            fs::read_to_string(output.path()).unwrap()
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("reading input file {}", canonicalize(&input_path)),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "formula has 7 variable(s) and 6 clause(s); a variable occurs in at most 6 clause(s)",
        );
        assert_log_message(&mut logger, Level::Info, "added 1 variable(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            "normalized formula has 8 variable(s) and 8 clause(s); a variable occurs in at most 5 clause(s)",
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("setting output file to {}", canonicalize(&output_path)),
        );
        assert!(logger.pop().is_none());
    }

    fn logtest_execute_no_split(mut logger: &mut Logger) {
        let content = "p cnf 3 2\na 1 0\ne 2 3 0\n1 -2 0\n2 3 0\n";
        let input = input_file(content);
        let input_path = format!("{}", input.path().display());
        let output = NamedTempFile::new().unwrap();
        let output_path = format!("{}", output.path().display());
        NormalizeCommand::new()
            .execute_internal(&input_path, Some(&output_path), 10, None)
            .unwrap();
        assert_eq!(
            "p cnf 3 2\na 1 0\ne 2 3 0\n1 -2 0\n2 3 0\n",
            fs::read_to_string(output.path()).unwrap()
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("reading input file {}", canonicalize(&input_path)),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "formula has 3 variable(s) and 2 clause(s); a variable occurs in at most 2 clause(s)",
        );
        assert_log_message(&mut logger, Level::Info, "added 0 variable(s)");
        assert_log_message(
            &mut logger,
            Level::Info,
            "normalized formula has 3 variable(s) and 2 clause(s); a variable occurs in at most 2 clause(s)",
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("setting output file to {}", canonicalize(&output_path)),
        );
        assert!(logger.pop().is_none());
    }

    fn logtest_execute_error(mut logger: &mut Logger, threshold: usize, expected_error: String) {
        let input = input_file(STAR_7);
        let input_path = format!("{}", input.path().display());
        let output = NamedTempFile::new().unwrap();
        let output_path = format!("{}", output.path().display());
        let error = NormalizeCommand::new()
            .execute_internal(&input_path, Some(&output_path), threshold, None)
            .unwrap_err();
        assert_err_message(vec![expected_error], error);
        assert_eq!("", fs::read_to_string(output.path()).unwrap());
        assert_log_message(
            &mut logger,
            Level::Info,
            format!("reading input file {}", canonicalize(&input_path)),
        );
        assert_log_message(
            &mut logger,
            Level::Info,
            "formula has 7 variable(s) and 6 clause(s); a variable occurs in at most 6 clause(s)",
        );
        assert!(logger.pop().is_none());
    }

    fn logtest_execute_threshold_too_low(logger: &mut Logger) {
        logtest_execute_error(
            logger,
            2,
            "the occurrence threshold must be at least 3 (got 2)".to_string(),
        );
    }

    fn logtest_execute_threshold_too_low_to_split(logger: &mut Logger) {
        logtest_execute_error(
            logger,
            4,
            "variable 1 occurs in 6 clauses and must be split, which requires an occurrence threshold of at least 5 (got 4)".to_string(),
        );
    }
}
