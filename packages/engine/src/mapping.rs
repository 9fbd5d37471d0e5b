use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::hash::column_hash;

/// Distinct bare column names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedColumns {
    names: IndexSet<String>,
}

impl ExtractedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`; returns false when it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A persisted or freshly built `(column_name, column_hash)` pair.
///
/// Serializes as a two-element array `[name, hash]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ColumnHashPair {
    pub column_name: String,
    pub column_hash: String,
}

impl ColumnHashPair {
    pub fn new(column_name: impl Into<String>, column_hash: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_hash: column_hash.into(),
        }
    }
}

impl From<(String, String)> for ColumnHashPair {
    fn from((column_name, column_hash): (String, String)) -> Self {
        Self {
            column_name,
            column_hash,
        }
    }
}

impl From<ColumnHashPair> for (String, String) {
    fn from(pair: ColumnHashPair) -> Self {
        (pair.column_name, pair.column_hash)
    }
}

/// Per-request name to digest table. Keys are bare names regardless of the
/// table they belong to, so `t1.a` and `t2.a` share one digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnHashMapping {
    entries: IndexMap<String, String>,
}

impl ColumnHashMapping {
    /// Hashes every extracted name exactly once, keeping first-seen order.
    pub fn build(columns: &ExtractedColumns) -> Self {
        let entries = columns
            .iter()
            .map(|name| (name.to_string(), column_hash(name)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, column_name: &str) -> Option<&str> {
        self.entries.get(column_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, hash)| (name.as_str(), hash.as_str()))
    }

    pub fn to_pairs(&self) -> Vec<ColumnHashPair> {
        self.iter()
            .map(|(name, hash)| ColumnHashPair::new(name, hash))
            .collect()
    }
}
