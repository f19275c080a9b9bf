//! Process-local [`FallbackStore`] backed by a locked hash map.
//!
//! Records live only as long as the process and are not shared between
//! replicas. Each call takes the lock once; read-modify-write cycles spanning
//! `get` and `put` are not serialised, so concurrent writers to one key can
//! lose an update.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{FallbackStore, FallbackStoreError};
use crate::domain::{FallbackKey, FallbackRecord};

const POISONED: &str = "fallback map lock poisoned";

/// In-memory fallback store.
#[derive(Debug, Default)]
pub struct InMemoryFallbackStore {
    records: RwLock<HashMap<FallbackKey, FallbackRecord>>,
}

impl InMemoryFallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FallbackStore for InMemoryFallbackStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get(&self, key: &FallbackKey) -> Result<Option<FallbackRecord>, FallbackStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| FallbackStoreError::unavailable(POISONED))?;
        Ok(records.get(key).cloned())
    }

    async fn put(&self, key: &FallbackKey, record: FallbackRecord) -> Result<(), FallbackStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| FallbackStoreError::unavailable(POISONED))?;
        records.insert(key.clone(), record);
        Ok(())
    }

    async fn delete(&self, key: &FallbackKey) -> Result<(), FallbackStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| FallbackStoreError::unavailable(POISONED))?;
        records.remove(key);
        Ok(())
    }
}
