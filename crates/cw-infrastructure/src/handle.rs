//! Instrumented cache handles and typed views
//!
//! A [`CacheHandle`] is the named, live cache object returned to callers.
//! The manager owns the registry slot; handles are cheap clones sharing
//! the same store and instrumentation state.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use cw_domain::error::Result;
use cw_domain::expiry::ExpiryPolicy;
use cw_domain::ports::cache::{CacheSpec, CacheStats, CacheStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

struct HandleInner {
    spec: CacheSpec,
    backend: String,
    store: Arc<dyn CacheStore>,
    management_enabled: AtomicBool,
    statistics_enabled: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Named, live cache object owned by a [`CacheManager`](crate::manager::CacheManager)
///
/// Clones share the underlying store and instrumentation state. Equality
/// is identity: two handles are equal when they refer to the same
/// registered cache.
#[derive(Clone)]
pub struct CacheHandle {
    inner: Arc<HandleInner>,
}

impl CacheHandle {
    pub(crate) fn new(
        spec: CacheSpec,
        backend: impl Into<String>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                spec,
                backend: backend.into(),
                store,
                management_enabled: AtomicBool::new(false),
                statistics_enabled: AtomicBool::new(false),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Cache name
    pub fn name(&self) -> &str {
        &self.inner.spec.name
    }

    /// The spec this cache was provisioned from
    pub fn spec(&self) -> &CacheSpec {
        &self.inner.spec
    }

    /// Name of the backend engine holding the entries
    pub fn backend_name(&self) -> &str {
        &self.inner.backend
    }

    /// Get the raw JSON value stored under `key`
    ///
    /// Counts a hit or miss when statistics instrumentation is enabled.
    pub fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value = self.inner.store.get(key)?;
        if self.is_statistics_enabled() {
            let counter = if value.is_some() {
                &self.inner.hits
            } else {
                &self.inner.misses
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    /// Store a raw JSON value under `key`
    pub fn put_json(&self, key: &str, value: &str) -> Result<()> {
        self.inner.store.insert(key, value)
    }

    /// Remove `key`, returning whether a live entry existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.inner.store.remove(key)
    }

    /// Whether a live entry exists for `key`
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.inner.store.contains(key)
    }

    /// Drop every entry
    pub fn clear(&self) -> Result<()> {
        self.inner.store.clear()
    }

    /// Number of resident entries
    pub fn entry_count(&self) -> Result<u64> {
        self.inner.store.entry_count()
    }

    /// Toggle management instrumentation
    pub fn set_management_enabled(&self, enabled: bool) {
        self.inner.management_enabled.store(enabled, Ordering::Release);
        tracing::debug!(cache = %self.name(), enabled, "management instrumentation toggled");
    }

    /// Toggle statistics instrumentation
    pub fn set_statistics_enabled(&self, enabled: bool) {
        self.inner.statistics_enabled.store(enabled, Ordering::Release);
        tracing::debug!(cache = %self.name(), enabled, "statistics instrumentation toggled");
    }

    /// Whether management instrumentation is on
    pub fn is_management_enabled(&self) -> bool {
        self.inner.management_enabled.load(Ordering::Acquire)
    }

    /// Whether statistics instrumentation is on
    pub fn is_statistics_enabled(&self) -> bool {
        self.inner.statistics_enabled.load(Ordering::Acquire)
    }

    /// Runtime snapshot of hit/miss counters and entry count
    pub fn stats(&self) -> Result<CacheStats> {
        let mut stats = CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            entries: self.inner.store.entry_count()?,
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    /// Introspection snapshot; `None` while management is disabled
    pub fn management_info(&self) -> Result<Option<CacheManagementInfo>> {
        if !self.is_management_enabled() {
            return Ok(None);
        }
        Ok(Some(CacheManagementInfo {
            name: self.inner.spec.name.clone(),
            backend: self.inner.backend.clone(),
            max_elements: self.inner.spec.max_elements,
            expiry: self.inner.spec.expiry,
            entries: self.inner.store.entry_count()?,
        }))
    }

    /// Typed serde view over the same store
    pub fn typed<K, V>(&self) -> TypedCache<K, V>
    where
        K: Serialize,
        V: Serialize + DeserializeOwned,
    {
        TypedCache {
            handle: self.clone(),
            _marker: PhantomData,
        }
    }
}

impl PartialEq for CacheHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for CacheHandle {}

impl fmt::Debug for CacheHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheHandle")
            .field("name", &self.inner.spec.name)
            .field("backend", &self.inner.backend)
            .field("max_elements", &self.inner.spec.max_elements)
            .field("expiry", &self.inner.spec.expiry)
            .finish()
    }
}

/// Management snapshot of a cache
///
/// Runtime introspection exposed while management instrumentation is
/// enabled on the handle.
#[derive(Debug, Clone, Serialize)]
pub struct CacheManagementInfo {
    /// Cache name
    pub name: String,
    /// Backend engine holding the entries
    pub backend: String,
    /// Configured element bound
    pub max_elements: u64,
    /// Configured expiry policy
    pub expiry: ExpiryPolicy,
    /// Current resident entry count
    pub entries: u64,
}

/// Typed view over a [`CacheHandle`]
///
/// Keys and values travel through `serde_json`. The untyped entry points
/// use the universal `serde_json::Value` pair; see [`UntypedCache`].
pub struct TypedCache<K, V> {
    handle: CacheHandle,
    _marker: PhantomData<fn(K) -> V>,
}

/// Typed cache with the universal key/value pair
pub type UntypedCache = TypedCache<serde_json::Value, serde_json::Value>;

impl<K, V> Clone for TypedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K, V> TypedCache<K, V>
where
    K: Serialize,
    V: Serialize + DeserializeOwned,
{
    fn encode_key(&self, key: &K) -> Result<String> {
        Ok(serde_json::to_string(key)?)
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &K) -> Result<Option<V>> {
        match self.handle.get_json(&self.encode_key(key)?)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace the value under `key`
    pub fn put(&self, key: &K, value: &V) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.handle.put_json(&self.encode_key(key)?, &json)
    }

    /// Remove `key`, returning whether a live entry existed
    pub fn remove(&self, key: &K) -> Result<bool> {
        self.handle.remove(&self.encode_key(key)?)
    }

    /// Whether a live entry exists for `key`
    pub fn contains(&self, key: &K) -> Result<bool> {
        self.handle.contains(&self.encode_key(key)?)
    }

    /// The untyped handle backing this view
    pub fn handle(&self) -> &CacheHandle {
        &self.handle
    }
}

impl<K, V> fmt::Debug for TypedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCache")
            .field("name", &self.handle.name())
            .finish()
    }
}
