use super::context::AppContext;
use crate::cli::root::{Cli, Command};
use crate::commands;
use crate::error::CliError;
use clap::Parser;

pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let context = AppContext {
        db_path: cli.db,
        format: cli.format,
    };

    match cli.command {
        Command::Anonymize(args) => commands::anonymize::run(&context, args),
        Command::Mappings(mappings_command) => commands::mappings::run(&context, mappings_command),
    }
}
