use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AnonymizeError;
use crate::mapping::{ColumnHashMapping, ColumnHashPair};
use crate::sql::{
    ensure_supported_statements, extract_columns, parse_sql_statements, rewrite_statements,
    serialize_statements, IdentifierQuoting,
};
use crate::store::MappingStore;
use crate::types::{AnonymizeRequest, AnonymizeResponse, AnonymizedSql};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    #[serde(default)]
    pub identifier_quoting: IdentifierQuoting,
}

/// Parse, extract, hash, rewrite and serialize one SQL text. Touches no
/// shared state, so it can run on any thread.
pub fn anonymize_sql(
    sql: &str,
    config: &AnonymizerConfig,
) -> Result<(AnonymizedSql, ColumnHashMapping), AnonymizeError> {
    let statements = parse_sql_statements(sql)?;
    debug!(statements = statements.len(), "parsed sql batch");
    ensure_supported_statements(&statements)?;

    let columns = extract_columns(&statements);
    let mapping = ColumnHashMapping::build(&columns);
    debug!(columns = mapping.len(), "built column hash mapping");

    let rewritten = rewrite_statements(&statements, &mapping)?;
    let modified_sql = serialize_statements(rewritten, config.identifier_quoting)?;

    let anonymized = AnonymizedSql {
        modified_sql,
        hashed_columns: mapping.to_pairs(),
        ast: statements,
    };
    Ok((anonymized, mapping))
}

/// Request-level entry point. Owns its store handle; nothing is global.
pub struct Anonymizer<S> {
    config: AnonymizerConfig,
    store: S,
}

impl<S: MappingStore> Anonymizer<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AnonymizerConfig::default())
    }

    pub fn with_config(store: S, config: AnonymizerConfig) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mappings are persisted only once the rewritten SQL has serialized,
    /// so a failed request leaves the store untouched.
    pub async fn anonymize(
        &self,
        request: AnonymizeRequest,
    ) -> Result<AnonymizeResponse, AnonymizeError> {
        if request.is_empty() {
            debug!("empty sql input, skipping anonymization");
            return Ok(AnonymizeResponse::skipped());
        }
        let sql = request.sql.as_deref().unwrap_or_default();

        let (anonymized, mapping) = anonymize_sql(sql, &self.config).map_err(|error| {
            warn!(code = error.code().as_str(), "anonymization failed");
            error
        })?;

        if !mapping.is_empty() {
            self.store
                .upsert_many(&anonymized.hashed_columns)
                .await
                .map_err(|error| {
                    warn!(code = "SQLMASK_ERROR_PERSISTENCE", "mapping upsert failed");
                    AnonymizeError::from(error)
                })?;
            info!(columns = mapping.len(), "persisted column hash mappings");
        }

        Ok(AnonymizeResponse::Anonymized(anonymized))
    }

    /// All persisted pairs, sorted by column name.
    pub async fn list_mappings(&self) -> Result<Vec<ColumnHashPair>, AnonymizeError> {
        let mut pairs = self.store.list_all().await?;
        pairs.sort();
        debug!(pairs = pairs.len(), "listed column hash mappings");
        Ok(pairs)
    }
}
