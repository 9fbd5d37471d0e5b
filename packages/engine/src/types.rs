use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;

use crate::mapping::ColumnHashPair;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    #[serde(default)]
    pub sql: Option<String>,
}

impl AnonymizeRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: Some(sql.into()),
        }
    }

    /// Absent or zero-length SQL. Such requests never reach the parser.
    pub fn is_empty(&self) -> bool {
        self.sql.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymizedSql {
    #[serde(rename = "modifiedSQL")]
    pub modified_sql: String,
    #[serde(rename = "hashedColumns")]
    pub hashed_columns: Vec<ColumnHashPair>,
    /// The batch as parsed, before rewriting. Diagnostic only.
    pub ast: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnonymizeResponse {
    /// Empty input: `{ "modifiedSQL": "" }`, nothing parsed or stored.
    Skipped {
        #[serde(rename = "modifiedSQL")]
        modified_sql: String,
    },
    Anonymized(AnonymizedSql),
}

impl AnonymizeResponse {
    pub fn skipped() -> Self {
        Self::Skipped {
            modified_sql: String::new(),
        }
    }

    pub fn modified_sql(&self) -> &str {
        match self {
            Self::Skipped { modified_sql } => modified_sql,
            Self::Anonymized(anonymized) => &anonymized.modified_sql,
        }
    }

    pub fn hashed_columns(&self) -> &[ColumnHashPair] {
        match self {
            Self::Skipped { .. } => &[],
            Self::Anonymized(anonymized) => &anonymized.hashed_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnonymizeRequest, AnonymizeResponse};

    #[test]
    fn missing_sql_field_is_an_empty_request() {
        let request: AnonymizeRequest = serde_json::from_str("{}").expect("request should parse");
        assert!(request.is_empty());
        assert!(AnonymizeRequest::new("").is_empty());
        assert!(!AnonymizeRequest::new(" ").is_empty());
    }

    #[test]
    fn skipped_response_has_only_modified_sql() {
        let json = serde_json::to_value(AnonymizeResponse::skipped()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "modifiedSQL": "" }));
    }
}
