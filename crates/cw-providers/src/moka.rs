//! Moka in-memory cache backend
//!
//! High-performance, concurrent heap-resident stores built on Moka. Each
//! provisioned cache maps to one `moka::sync::Cache` configured with a
//! maximum element count and an optional time-to-live.
//!
//! ## Example
//!
//! ```ignore
//! use cw_domain::ports::cache::{CacheBackend, CacheSpec};
//! use cw_providers::MokaBackend;
//!
//! let backend = MokaBackend::new();
//! let store = backend.open_store(&CacheSpec::new("sessions").with_ttl_seconds(1800))?;
//! ```

use std::sync::Arc;

use cw_domain::error::{Error, Result};
use cw_domain::ports::cache::{CacheBackend, CacheSpec, CacheStore};
use cw_domain::ports::registry::{CacheBackendConfig, CacheBackendEntry, CACHE_BACKENDS};
use moka::sync::Cache;

/// One Moka-backed store
///
/// Values are JSON strings held as `Arc<str>` so reads clone cheaply.
/// Expired entries are filtered on read by Moka itself.
#[derive(Clone)]
pub struct MokaStore {
    cache: Cache<String, Arc<str>>,
    max_elements: u64,
}

impl MokaStore {
    /// Build a store configured per the spec
    pub fn from_spec(spec: &CacheSpec) -> Self {
        let mut builder = Cache::builder().max_capacity(spec.max_elements);
        if let Some(ttl) = spec.expiry.time_to_live() {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
            max_elements: spec.max_elements,
        }
    }

    /// Maximum element count this store was built with
    pub fn max_elements(&self) -> u64 {
        self.max_elements
    }
}

impl CacheStore for MokaStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).map(|value| value.to_string()))
    }

    fn insert(&self, key: &str, value: &str) -> Result<()> {
        self.cache.insert(key.to_string(), Arc::from(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key);
        Ok(existed)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        Ok(())
    }

    fn entry_count(&self) -> Result<u64> {
        // Run pending tasks so the count reflects completed evictions
        self.cache.run_pending_tasks();
        Ok(self.cache.entry_count())
    }
}

impl std::fmt::Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("max_elements", &self.max_elements)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

/// Moka cache backend
///
/// Builds one [`MokaStore`] per provisioned cache. A zero element bound is
/// rejected here: Moka itself accepts `max_capacity(0)` and would silently
/// cache nothing.
#[derive(Debug, Clone, Default)]
pub struct MokaBackend;

impl MokaBackend {
    /// Create a new Moka backend
    pub fn new() -> Self {
        Self
    }
}

impl CacheBackend for MokaBackend {
    fn open_store(&self, spec: &CacheSpec) -> Result<Arc<dyn CacheStore>> {
        if spec.max_elements == 0 {
            return Err(Error::ResourcePool {
                message: format!("cache '{}' requires a positive element bound", spec.name),
            });
        }

        tracing::debug!(
            cache = %spec.name,
            max_elements = spec.max_elements,
            eternal = spec.expiry.is_eternal(),
            "opening moka store"
        );
        Ok(Arc::new(MokaStore::from_spec(spec)))
    }

    fn backend_name(&self) -> &str {
        "moka"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_BACKENDS)]
static MOKA_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "moka",
    description: "Moka high-performance in-memory cache",
    factory: |_config: &CacheBackendConfig| Ok(Arc::new(MokaBackend::new())),
};
