use clap::{Args, ValueEnum};
use sqlmask_rs_sdk::IdentifierQuoting;

#[derive(Debug, Args)]
pub struct AnonymizeArgs {
    /// How table names, aliases and qualifiers are rendered.
    #[arg(long, value_enum, default_value_t = QuotingArg::Always)]
    pub quoting: QuotingArg,

    /// Anonymize without writing mappings to the database.
    #[arg(long)]
    pub dry_run: bool,

    /// SQL text to anonymize. Use '-' to read from stdin.
    pub sql: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum QuotingArg {
    Always,
    AsWritten,
}

impl From<QuotingArg> for IdentifierQuoting {
    fn from(value: QuotingArg) -> Self {
        match value {
            QuotingArg::Always => IdentifierQuoting::Always,
            QuotingArg::AsWritten => IdentifierQuoting::AsWritten,
        }
    }
}
