use crate::app::AppContext;
use crate::cli::mappings::{MappingsCommand, MappingsSubcommand};
use crate::cli::root::OutputFormat;
use crate::db;
use crate::error::CliError;
use crate::output;
use sqlmask_rs_sdk::{Anonymizer, AnonymizerConfig};
use tracing::debug;

pub fn run(context: &AppContext, command: MappingsCommand) -> Result<(), CliError> {
    match command.command {
        MappingsSubcommand::List => list(context),
    }
}

fn list(context: &AppContext) -> Result<(), CliError> {
    let store = db::open_store_at(&context.db_path)?;
    let anonymizer = Anonymizer::with_config(store, AnonymizerConfig::default());
    let pairs = pollster::block_on(anonymizer.list_mappings())?;
    debug!(pairs = pairs.len(), "listing column hash mappings");

    match context.format {
        OutputFormat::Json => output::print_mappings_json(&pairs),
        OutputFormat::Table => output::print_mappings_table(&pairs),
    }
    Ok(())
}
