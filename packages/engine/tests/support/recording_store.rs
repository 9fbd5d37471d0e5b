use std::sync::atomic::{AtomicUsize, Ordering};

use sqlmask_engine::{ColumnHashPair, InMemoryMappingStore, MappingStore, StoreError};

/// In-memory store that counts calls and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryMappingStore,
    upsert_calls: AtomicUsize,
    list_calls: AtomicUsize,
    fail_with: Option<String>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait(?Send)]
impl MappingStore for RecordingStore {
    async fn upsert_many(&self, pairs: &[ColumnHashPair]) -> Result<(), StoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(StoreError::new(message.clone()));
        }
        self.inner.upsert_many(pairs).await
    }

    async fn list_all(&self) -> Result<Vec<ColumnHashPair>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(StoreError::new(message.clone()));
        }
        self.inner.list_all().await
    }
}
