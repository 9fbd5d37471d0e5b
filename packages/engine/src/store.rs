use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::mapping::ColumnHashPair;

/// Durable, key-unique home for discovered `(column_name, column_hash)` pairs.
///
/// `upsert_many` is insert-or-ignore: a name that already exists keeps its
/// stored hash and no error is raised. Implementations must hold that under
/// concurrent callers upserting overlapping names.
#[async_trait(?Send)]
pub trait MappingStore: Send + Sync {
    async fn upsert_many(&self, pairs: &[ColumnHashPair]) -> Result<(), StoreError>;

    /// Every persisted pair, in no particular order.
    async fn list_all(&self) -> Result<Vec<ColumnHashPair>, StoreError>;
}

#[async_trait(?Send)]
impl<S: MappingStore + ?Sized> MappingStore for Box<S> {
    async fn upsert_many(&self, pairs: &[ColumnHashPair]) -> Result<(), StoreError> {
        (**self).upsert_many(pairs).await
    }

    async fn list_all(&self) -> Result<Vec<ColumnHashPair>, StoreError> {
        (**self).list_all().await
    }
}

/// Process-local store, mainly for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl MappingStore for InMemoryMappingStore {
    async fn upsert_many(&self, pairs: &[ColumnHashPair]) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::new("in-memory mapping store mutex poisoned"))?;
        for pair in pairs {
            entries
                .entry(pair.column_name.clone())
                .or_insert_with(|| pair.column_hash.clone());
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ColumnHashPair>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::new("in-memory mapping store mutex poisoned"))?;
        Ok(entries
            .iter()
            .map(|(name, hash)| ColumnHashPair::new(name.clone(), hash.clone()))
            .collect())
    }
}
