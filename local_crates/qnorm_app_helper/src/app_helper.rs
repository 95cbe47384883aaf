// qnorm_app_helper
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

use crate::{
    logger::{self, DEFAULT_LOGGING_LEVEL, LOGGING_LEVELS},
    Command,
};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{error, info};

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

/// A structure used to build applications made of subcommands.
///
/// Each subcommand is given by an object implementing [`Command`].
/// A global `--logging-level` option sets the verbosity of the logger, which writes to the standard error.
///
/// # Example
///
/// ```no_run
/// use qnorm_app_helper::AppHelper;
///
/// let app = AppHelper::new("my_app", "0.1.0", "me", "does things");
/// // app.add_command(Box::new(MyCommand::new()));
/// app.launch_app();
/// ```
pub struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    /// Builds a new application.
    pub fn new(app_name: &'a str, version: &'a str, authors: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            authors,
            about,
            commands: vec![],
        }
    }

    /// Registers a subcommand.
    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    /// Parses the command line arguments and runs the selected command.
    ///
    /// If the command fails, each error of the chain is logged and the process exits with status `1`.
    pub fn launch_app(&self) {
        let matches = self.clap_app().get_matches();
        let logger_init =
            logger::parse_level_filter(logging_level(&matches)).and_then(logger::init_logger);
        if let Err(e) = logger_init {
            // kcov-ignore-start
            eprintln!("{:?}", e);
            std::process::exit(1);
            // kcov-ignore-end
        }
        info!("{} {}", self.app_name, self.version);
        if let Err(e) = self.execute_command(&matches) {
            // kcov-ignore-start
            e.chain().for_each(|c| error!("{}", c));
            std::process::exit(1);
            // kcov-ignore-end
        }
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .version(self.version)
            .author(self.authors)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .arg(
                Arg::with_name(ARG_LOGGING_LEVEL)
                    .long("logging-level")
                    .takes_value(true)
                    .possible_values(&LOGGING_LEVELS)
                    .global(true)
                    .help("sets the minimal level of the displayed log messages (default: info)"),
            );
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        app
    }

    fn execute_command(&self, matches: &ArgMatches<'_>) -> Result<()> {
        let (name, sub_matches) = matches.subcommand();
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow!(r#"no such command: "{}""#, name))?;
        let sub_matches = sub_matches.ok_or_else(|| anyhow!("missing arguments"))?;
        command.execute(sub_matches)
    }
}

fn logging_level<'b>(matches: &'b ArgMatches<'_>) -> &'b str {
    matches
        .subcommand()
        .1
        .and_then(|m| m.value_of(ARG_LOGGING_LEVEL))
        .or_else(|| matches.value_of(ARG_LOGGING_LEVEL))
        .unwrap_or(DEFAULT_LOGGING_LEVEL)
}
