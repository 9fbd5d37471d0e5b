mod anonymizer;
mod error;
mod hash;
mod mapping;
mod sql;
mod store;
mod types;

pub use anonymizer::{anonymize_sql, Anonymizer, AnonymizerConfig};
pub use error::{AnonymizeError, ErrorBody, ErrorCode, StoreError};
pub use hash::{column_hash, COLUMN_HASH_LEN};
pub use mapping::{ColumnHashMapping, ColumnHashPair, ExtractedColumns};
pub use sql::{
    extract_columns, parse_sql_statements, rewrite_statement, rewrite_statements,
    serialize_statements, IdentifierQuoting, STATEMENT_SEPARATOR,
};
pub use store::{InMemoryMappingStore, MappingStore};
pub use types::{AnonymizeRequest, AnonymizeResponse, AnonymizedSql};
