//! Null cache backend for testing
//!
//! A backend whose stores hold nothing. Every read misses and every write
//! is accepted and dropped. Useful for tests and for disabling caching.

use std::sync::Arc;

use cw_domain::error::Result;
use cw_domain::ports::cache::{CacheBackend, CacheSpec, CacheStore};
use cw_domain::ports::registry::{CacheBackendConfig, CacheBackendEntry, CACHE_BACKENDS};

/// Store that drops every write
#[derive(Debug, Clone, Default)]
pub struct NullStore;

impl NullStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

impl CacheStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        // Always a miss
        Ok(None)
    }

    fn insert(&self, _key: &str, _value: &str) -> Result<()> {
        // Accept the write but store nothing
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn contains(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }

    fn entry_count(&self) -> Result<u64> {
        Ok(0)
    }
}

/// Backend producing [`NullStore`]s
#[derive(Debug, Clone, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

impl CacheBackend for NullBackend {
    fn open_store(&self, _spec: &CacheSpec) -> Result<Arc<dyn CacheStore>> {
        Ok(Arc::new(NullStore::new()))
    }

    fn backend_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_BACKENDS)]
static NULL_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "null",
    description: "No-op backend that stores nothing",
    factory: |_config: &CacheBackendConfig| Ok(Arc::new(NullBackend::new())),
};
