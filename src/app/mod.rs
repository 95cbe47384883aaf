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

mod check_command;
pub(crate) use check_command::CheckCommand;

mod measure_command;
pub(crate) use measure_command::MeasureCommand;

mod normalize_command;
pub(crate) use normalize_command::NormalizeCommand;

mod normalize_dir_command;
pub(crate) use normalize_dir_command::NormalizeDirCommand;

use anyhow::{Context, Result};
use qnorm_app_helper::{info, warn, Arg, ArgMatches};
use qnorm_io::{normalize, Formula, QdimacsReader};
use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
};

const ARG_INPUT: &str = "INPUT";
const ARG_OUTPUT: &str = "OUTPUT";
const ARG_MAX_OCCURRENCES: &str = "MAX_OCCURRENCES";
const ARG_DIRECTORY: &str = "DIRECTORY";
const ARG_FILE_PATTERN: &str = "FILE_PATTERN";
pub(crate) const ARG_SOLVER: &str = "SOLVER";
const ARG_DECISION_LIMIT: &str = "DECISION_LIMIT";

pub(crate) fn arg_input<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_INPUT)
        .long("input")
        .short("i")
        .takes_value(true)
        .help("sets the QDIMACS input file")
        .required(true)
}

pub(crate) fn input_path<'a>(arg_matches: &'a ArgMatches<'_>) -> Result<&'a str> {
    arg_matches
        .value_of(ARG_INPUT)
        .context("missing input file")
}

pub(crate) fn arg_output<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_OUTPUT)
        .long("output")
        .short("o")
        .takes_value(true)
        .help("sets the QDIMACS output file")
}

pub(crate) fn output_path<'a>(arg_matches: &'a ArgMatches<'_>) -> Option<&'a str> {
    arg_matches.value_of(ARG_OUTPUT)
}

pub(crate) fn create_output(output_path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match output_path {
        Some(o) => {
            let r = Box::new(
                File::create(o).with_context(|| format!(r#"while creating file "{}""#, o))?,
            );
            info!("setting output file to {}", canonicalize(o));
            r
        }
        None => {
            info!("setting output to STDOUT");
            Box::new(std::io::stdout())
        }
    })
}

pub(crate) fn arg_max_occurrences<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_MAX_OCCURRENCES)
        .long("max-occurrences")
        .short("m")
        .takes_value(true)
        .default_value("10")
        .help("sets the maximal number of clauses a variable may occur in")
}

pub(crate) fn read_max_occurrences(arg_matches: &ArgMatches<'_>) -> Result<usize> {
    let value = arg_matches
        .value_of(ARG_MAX_OCCURRENCES)
        .context("missing occurrence threshold")?;
    value
        .parse::<usize>()
        .with_context(|| format!(r#"invalid occurrence threshold "{}""#, value))
}

pub(crate) fn arg_directory<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_DIRECTORY)
        .long("directory")
        .short("d")
        .takes_value(true)
        .default_value(".")
        .help("sets the directory to read formulas from")
}

pub(crate) fn arg_file_pattern<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_FILE_PATTERN)
        .long("file-type")
        .short("t")
        .takes_value(true)
        .default_value("*.qdimacs")
        .help("sets the pattern of the names of the files to read")
}

pub(crate) fn read_directory_and_pattern<'a>(
    arg_matches: &'a ArgMatches<'_>,
) -> Result<(&'a str, &'a str)> {
    let directory = arg_matches
        .value_of(ARG_DIRECTORY)
        .context("missing directory")?;
    let pattern = arg_matches
        .value_of(ARG_FILE_PATTERN)
        .context("missing file pattern")?;
    Ok((directory, pattern))
}

pub(crate) fn arg_solver<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_SOLVER)
        .long("solver")
        .takes_value(true)
        .help("sets the path to the external QBF solver")
}

pub(crate) fn arg_decision_limit<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_DECISION_LIMIT)
        .long("decision-limit")
        .takes_value(true)
        .help("sets the maximal number of decisions of the external solver")
}

pub(crate) fn read_decision_limit(arg_matches: &ArgMatches<'_>) -> Result<Option<usize>> {
    arg_matches
        .value_of(ARG_DECISION_LIMIT)
        .map(|l| {
            l.parse::<usize>()
                .with_context(|| format!(r#"invalid decision limit "{}""#, l))
        })
        .transpose()
}

pub(crate) fn read_qdimacs_file(path: &Path) -> Result<Formula> {
    info!("reading input file {}", canonicalize(&path.display().to_string()));
    let mut file = File::open(path)
        .with_context(|| format!(r#"while opening file "{}""#, path.display()))?;
    read_qdimacs(&mut file).map(|(formula, _)| formula)
}

/// Reads a formula, logging the warnings; returns the formula and the number of warnings.
pub(crate) fn read_qdimacs(reader: &mut dyn Read) -> Result<(Formula, usize)> {
    let mut qdimacs_reader = QdimacsReader::default();
    let mut warning_counter = 0;
    let mut warning_handler = |line: usize, reason: String| {
        warn!("line {}: {}", line, reason);
        warning_counter += 1;
    };
    qdimacs_reader.add_warning_handler(&mut warning_handler);
    let formula = qdimacs_reader.read(reader)?;
    drop(qdimacs_reader);
    Ok((formula, warning_counter))
}

pub(crate) fn normalize_formula(formula: Formula, threshold: usize) -> Result<Formula> {
    info!(
        "formula has {} variable(s) and {} clause(s); a variable occurs in at most {} clause(s)",
        formula.n_vars(),
        formula.n_clauses(),
        formula.max_occurrences()
    );
    let n_vars = formula.n_vars();
    let normalized = normalize(formula, threshold)?;
    info!("added {} variable(s)", normalized.n_vars() - n_vars);
    info!(
        "normalized formula has {} variable(s) and {} clause(s); a variable occurs in at most {} clause(s)",
        normalized.n_vars(),
        normalized.n_clauses(),
        normalized.max_occurrences()
    );
    Ok(normalized)
}

pub(crate) fn canonicalize(file_path: &str) -> String {
    match fs::canonicalize(&PathBuf::from(file_path)) {
        Ok(p) => format!("{}", p.display()),
        Err(_) => file_path.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Error;
    use logtest::Logger;
    use qnorm_app_helper::Level;

    #[test]
    fn logtest() {
        let mut logger = Logger::start();
        check_command::tests::logtest_check(&mut logger);
        normalize_command::tests::logtest_normalize(&mut logger);
        normalize_dir_command::tests::logtest_normalize_dir(&mut logger);
        measure_command::tests::logtest_measure(&mut logger);
        assert!(logger.pop().is_none());
    }

    pub(crate) fn assert_log_message<T>(logger: &mut Logger, level: Level, message: T)
    where
        T: AsRef<str>,
    {
        let log_message = logger.pop().unwrap();
        assert_eq!(
            level,
            log_message.level(),
            "expected log level {}, got log level {} and message \"{}\"",
            level,
            log_message.level(),
            log_message.args()
        );
        assert_eq!(
            message.as_ref(),
            log_message.args(),
            "expected message \"{}\", got log level {} and message \"{}\"",
            message.as_ref(),
            log_message.level(),
            log_message.args()
        );
    }

    pub(crate) fn assert_err_message<T>(expected_chain: Vec<T>, actual: Error)
    where
        T: AsRef<str>,
    {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(
            expected_chain
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect::<Vec<String>>(),
            error_chain
        );
    }

    #[test]
    fn test_canonicalize_missing_file() {
        assert_eq!("/no/such/file", canonicalize("/no/such/file"));
    }
}
