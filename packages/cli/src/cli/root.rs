use super::anonymize::AnonymizeArgs;
use super::mappings::MappingsCommand;
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sqlmask")]
#[command(about = "Anonymize column names in SQL text")]
pub struct Cli {
    /// Path to the SQLite file holding column hash mappings.
    #[arg(
        long,
        global = true,
        env = "SQLMASK_DB",
        default_value = "sqlmask.db",
        value_hint = ValueHint::FilePath
    )]
    pub db: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace column names with their hashes and record the mapping.
    Anonymize(AnonymizeArgs),
    /// Inspect persisted column hash mappings.
    Mappings(MappingsCommand),
}
