use crate::app::AppContext;
use crate::error::CliError;
use sqlmask_rs_sdk::{
    Anonymizer, AnonymizerConfig, InMemoryMappingStore, MappingStore, SqliteMappingStore,
};
use std::path::Path;

pub type CliAnonymizer = Anonymizer<Box<dyn MappingStore>>;

/// Anonymizer over the context's database, or over a throwaway in-memory
/// store when `dry_run` is set.
pub fn open_anonymizer(
    context: &AppContext,
    config: AnonymizerConfig,
    dry_run: bool,
) -> Result<CliAnonymizer, CliError> {
    let store: Box<dyn MappingStore> = if dry_run {
        Box::new(InMemoryMappingStore::new())
    } else {
        Box::new(open_store_at(&context.db_path)?)
    };
    Ok(Anonymizer::with_config(store, config))
}

pub fn open_store_at(path: &Path) -> Result<SqliteMappingStore, CliError> {
    SqliteMappingStore::open(path).map_err(|err| {
        CliError::msg(format!(
            "failed to open mapping database at {}: {}",
            path.display(),
            err
        ))
    })
}
