//! Helpers for command line applications made of subcommands.
//!
//! An [`AppHelper`] gathers [`Command`]s, parses the command line, installs the logger and runs the selected command.

mod app_helper;
pub use app_helper::AppHelper;

mod command;
pub use command::Command;

mod logger;

pub use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
pub use log::{debug, error, info, trace, warn, Level, LevelFilter};
