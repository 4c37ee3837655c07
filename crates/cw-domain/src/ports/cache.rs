//! Cache Backend Port
//!
//! Contracts for cache storage engines. A backend builds one bounded,
//! expiring store per provisioned cache; the manager and provisioner in
//! `cw-infrastructure` are written against these traits only, so new
//! engines can be added without touching them.

use crate::error::Result;
use crate::expiry::ExpiryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default maximum element count for caches that do not specify one
pub const DEFAULT_MAX_ELEMENTS: u64 = 10_000;

/// Cache Specification
///
/// Describes one cache-creation call: the cache name, the bound on
/// heap-resident entries, and the expiry policy. Constructed fresh per
/// call and retained only as handle metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSpec {
    /// Cache name, unique within a manager's namespace
    pub name: String,
    /// Maximum number of heap-held entries
    pub max_elements: u64,
    /// Expiry policy for every entry
    pub expiry: ExpiryPolicy,
}

impl CacheSpec {
    /// Create a spec with the default bound and eternal expiry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_elements: DEFAULT_MAX_ELEMENTS,
            expiry: ExpiryPolicy::Eternal,
        }
    }

    /// Set the maximum element count
    pub fn with_max_elements(mut self, max_elements: u64) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Set the expiry policy
    pub fn with_expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = expiry;
        self
    }

    /// Set the expiry policy from a TTL in seconds
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.expiry = ExpiryPolicy::from_ttl_seconds(ttl_seconds);
        self
    }
}

/// Cache Operation Statistics
///
/// Tracks cache performance metrics including hits, misses, and hit rate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of resident entries
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Cache Store Port
///
/// One bounded, expiring key-value store owned by a backend. Keys are
/// strings and values are JSON strings; expired entries are never
/// returned. All operations are blocking calls.
pub trait CacheStore: Send + Sync + fmt::Debug {
    /// Get the value stored under `key`, `None` if absent or expired
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value under `key`
    fn insert(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether a live entry existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// Whether a live entry exists for `key`
    fn contains(&self, key: &str) -> Result<bool>;

    /// Drop every entry
    fn clear(&self) -> Result<()>;

    /// Number of resident entries, after pending maintenance has run
    fn entry_count(&self) -> Result<u64>;
}

/// Cache Backend Port
///
/// Engine abstraction: builds stores per [`CacheSpec`]. Implementations
/// validate the resource bound for their engine and reject bounds the
/// engine cannot honor.
pub trait CacheBackend: Send + Sync + fmt::Debug {
    /// Open a store configured per the spec
    ///
    /// Fails with [`Error::ResourcePool`](crate::error::Error::ResourcePool)
    /// when the requested bound is invalid for this engine.
    fn open_store(&self, spec: &CacheSpec) -> Result<Arc<dyn CacheStore>>;

    /// Identifier of this backend (e.g., "moka", "null")
    fn backend_name(&self) -> &str;
}
