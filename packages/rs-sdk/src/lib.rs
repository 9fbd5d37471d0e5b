mod backend;

pub use backend::SqliteMappingStore;
pub use sqlmask_engine::{
    anonymize_sql, column_hash, AnonymizeError, AnonymizeRequest, AnonymizeResponse,
    AnonymizedSql, Anonymizer, AnonymizerConfig, ColumnHashPair, ErrorBody, ErrorCode,
    IdentifierQuoting, InMemoryMappingStore, MappingStore, StoreError,
};

/// Anonymizer persisting into the SQLite file at `path`.
pub fn open_anonymizer(
    path: impl AsRef<std::path::Path>,
    config: AnonymizerConfig,
) -> Result<Anonymizer<SqliteMappingStore>, StoreError> {
    let store = SqliteMappingStore::open(path)?;
    Ok(Anonymizer::with_config(store, config))
}
