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

use super::read_qdimacs;
use anyhow::{Context, Result};
use qnorm_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use std::{fs::File, path::PathBuf};

const CMD_NAME: &str = "check";

const ARG_INPUT_FILE: &str = "INPUT_FILE";

#[derive(Default)]
pub(crate) struct CheckCommand();

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("check a QDIMACS file")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_INPUT_FILE)
                    .help("Sets the input file to check")
                    .required(true),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let str_path = arg_matches
            .value_of(ARG_INPUT_FILE)
            .context("missing input file")?;
        self.execute_internal(str_path)
    }
}

impl CheckCommand {
    fn execute_internal(&self, str_path: &str) -> Result<()> {
        info!("executing QDIMACS checker");
        info!("input file is {}", str_path);
        let path = PathBuf::from(str_path);
        let mut file_reader =
            File::open(&path).with_context(|| format!("while opening file {}", &path.display()))?;
        let (formula, warning_counter) = read_qdimacs(&mut file_reader)?;
        info!("instance was read without errors");
        match warning_counter {
            0 => info!("no warnings were found"),
            n => info!("got {} warning(s)", n),
        }
        info!(
            "instance contains {} variable(s) ({} universal) and {} clause(s)",
            formula.n_vars(),
            formula.universals().len(),
            formula.n_clauses()
        );
        info!(
            "a variable occurs in at most {} clause(s)",
            formula.max_occurrences()
        );
        Ok(())
    }
}
