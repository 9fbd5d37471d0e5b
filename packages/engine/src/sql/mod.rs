mod extract;
mod parse;
mod rewrite;
mod serialize;
mod sites;

pub use extract::extract_columns;
pub use parse::parse_sql_statements;
pub use rewrite::{rewrite_statement, rewrite_statements};
pub use serialize::{serialize_statements, IdentifierQuoting, STATEMENT_SEPARATOR};
pub(crate) use sites::ensure_supported_statements;
