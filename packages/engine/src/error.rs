use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SqlSyntax,
    UnsupportedStatement,
    MissingMapping,
    Serialization,
    Persistence,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SqlSyntax => "SQLMASK_ERROR_SQL_SYNTAX",
            Self::UnsupportedStatement => "SQLMASK_ERROR_UNSUPPORTED_STATEMENT",
            Self::MissingMapping => "SQLMASK_ERROR_MISSING_MAPPING",
            Self::Serialization => "SQLMASK_ERROR_SERIALIZATION",
            Self::Persistence => "SQLMASK_ERROR_PERSISTENCE",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::SqlSyntax,
            Self::UnsupportedStatement,
            Self::MissingMapping,
            Self::Serialization,
            Self::Persistence,
        ]
    }
}

/// Failure reported by a [`crate::MappingStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymizeError {
    /// The parser rejected the input text.
    SqlSyntax { message: String },
    /// A statement kind whose column positions are not all rewritten, such as
    /// MERGE or DDL. Refused so no name leaves in clear text.
    UnsupportedStatement {
        statement_index: usize,
        keyword: String,
    },
    /// A column reference was reached during rewriting that extraction never
    /// reported. Always an internal defect.
    MissingMapping { column: String },
    /// A rewritten statement did not serialize back into parseable SQL.
    Serialization {
        statement_index: usize,
        message: String,
    },
    Persistence(StoreError),
}

impl AnonymizeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SqlSyntax { .. } => ErrorCode::SqlSyntax,
            Self::UnsupportedStatement { .. } => ErrorCode::UnsupportedStatement,
            Self::MissingMapping { .. } => ErrorCode::MissingMapping,
            Self::Serialization { .. } => ErrorCode::Serialization,
            Self::Persistence(_) => ErrorCode::Persistence,
        }
    }

    /// True when the caller supplied bad input, as opposed to an internal or
    /// storage failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SqlSyntax { .. } | Self::UnsupportedStatement { .. }
        )
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().as_str(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for AnonymizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SqlSyntax { message } => write!(f, "sql syntax error: {message}"),
            Self::UnsupportedStatement {
                statement_index,
                keyword,
            } => write!(
                f,
                "statement {statement_index} ({keyword}) cannot be anonymized"
            ),
            Self::MissingMapping { column } => {
                write!(f, "no hash mapping for column '{column}'")
            }
            Self::Serialization {
                statement_index,
                message,
            } => write!(
                f,
                "rewritten statement {statement_index} failed to serialize: {message}"
            ),
            Self::Persistence(error) => write!(f, "mapping store failure: {error}"),
        }
    }
}

impl std::error::Error for AnonymizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(error) => Some(error),
            _ => None,
        }
    }
}

impl From<StoreError> for AnonymizeError {
    fn from(error: StoreError) -> Self {
        Self::Persistence(error)
    }
}

/// Structured failure body handed to callers at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{AnonymizeError, ErrorCode, StoreError};
    use std::collections::HashSet;

    #[test]
    fn error_code_strings_are_unique() {
        let mut seen = HashSet::new();
        for code in ErrorCode::all() {
            let inserted = seen.insert(code.as_str());
            assert!(inserted, "duplicate error code string: {}", code.as_str());
        }
    }

    #[test]
    fn only_input_errors_are_client_errors() {
        let syntax = AnonymizeError::SqlSyntax {
            message: "Expected: an SQL statement".to_string(),
        };
        let missing = AnonymizeError::MissingMapping {
            column: "a".to_string(),
        };
        let unsupported = AnonymizeError::UnsupportedStatement {
            statement_index: 1,
            keyword: "MERGE".to_string(),
        };
        let persistence = AnonymizeError::from(StoreError::new("disk full"));

        assert!(syntax.is_client_error());
        assert!(unsupported.is_client_error());
        assert_eq!(
            unsupported.to_body().code,
            "SQLMASK_ERROR_UNSUPPORTED_STATEMENT"
        );
        assert!(!missing.is_client_error());
        assert!(!persistence.is_client_error());
    }

    #[test]
    fn body_carries_code_and_column_name() {
        let body = AnonymizeError::MissingMapping {
            column: "order_total".to_string(),
        }
        .to_body();

        assert_eq!(body.code, "SQLMASK_ERROR_MISSING_MAPPING");
        assert!(body.message.contains("order_total"));
    }
}
