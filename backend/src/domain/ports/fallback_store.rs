//! Port for the ephemeral fallback store.
//!
//! The fallback store keeps votes and comments for entities that have no
//! persisted row (demo or seed content).
//!
//! ## Durability
//! Records are NOT durable. They live only as long as the implementation's
//! backing storage; an in-process map loses everything on restart and is not
//! shared between replicas. Nothing written here is ever reconciled with the
//! persistent store.
//!
//! ## Concurrency
//! Callers perform read-modify-write cycles through `get` and `put` without
//! any cross-call lock. Two concurrent writers to the same key may lose one
//! update.

use async_trait::async_trait;

use crate::domain::{FallbackKey, FallbackRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by fallback store implementations.
    pub enum FallbackStoreError {
        /// The backing storage could not be reached.
        Unavailable { message: String } => "fallback store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Whether absent entities should be served from this store at all.
    fn is_enabled(&self) -> bool;

    /// Fetch the record for `key`, if one exists.
    async fn get(&self, key: &FallbackKey) -> Result<Option<FallbackRecord>, FallbackStoreError>;

    /// Replace the record for `key`.
    async fn put(&self, key: &FallbackKey, record: FallbackRecord) -> Result<(), FallbackStoreError>;

    /// Remove the record for `key`.
    async fn delete(&self, key: &FallbackKey) -> Result<(), FallbackStoreError>;
}

/// Store that is switched off. Absent entities are reported as not found.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledFallbackStore;

#[async_trait]
impl FallbackStore for DisabledFallbackStore {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn get(&self, _key: &FallbackKey) -> Result<Option<FallbackRecord>, FallbackStoreError> {
        Ok(None)
    }

    async fn put(
        &self,
        _key: &FallbackKey,
        _record: FallbackRecord,
    ) -> Result<(), FallbackStoreError> {
        Err(FallbackStoreError::unavailable("fallback store is disabled"))
    }

    async fn delete(&self, _key: &FallbackKey) -> Result<(), FallbackStoreError> {
        Ok(())
    }
}
