pub mod recording_store;

use sqlmask_engine::{column_hash, ColumnHashPair};

/// `"<sha256(name)>"`, the way a hashed column appears in output SQL.
pub fn quoted_hash(name: &str) -> String {
    format!("\"{}\"", column_hash(name))
}

pub fn pairs(names: &[&str]) -> Vec<ColumnHashPair> {
    names
        .iter()
        .map(|name| ColumnHashPair::new(*name, column_hash(name)))
        .collect()
}
