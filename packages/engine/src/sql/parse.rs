use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::error::AnonymizeError;

/// Parses `sql` into an ordered statement batch using the generic dialect.
pub fn parse_sql_statements(sql: &str) -> Result<Vec<Statement>, AnonymizeError> {
    Parser::parse_sql(&GenericDialect {}, sql).map_err(|error| AnonymizeError::SqlSyntax {
        message: error.to_string(),
    })
}
