use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MappingsCommand {
    #[command(subcommand)]
    pub command: MappingsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum MappingsSubcommand {
    /// List every persisted column name and its hash, sorted by name.
    List,
}
