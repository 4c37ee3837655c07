//! Programmatic cache provisioning
//!
//! The capability interface callers depend on, plus the default
//! implementation over a shared [`CacheManager`]. The standard cache APIs
//! do not give enough control over sizing and expiry, so it is
//! encapsulated here.

use std::sync::{Arc, Mutex, PoisonError};

use cw_domain::error::Result;
use cw_domain::expiry::ExpiryPolicy;
use cw_domain::ports::cache::CacheSpec;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::MERGED_CONFIG_RESOURCE_URI;
use crate::handle::{CacheHandle, TypedCache};
use crate::manager::CacheManager;

/// Programmatic cache provisioning
///
/// One implementing type per backend engine; callers depend only on this
/// trait. Creation is not idempotent: a second call with the same name
/// surfaces the manager's duplicate-name failure.
pub trait CacheProvisioner: Send + Sync {
    /// Look up an existing cache by name
    ///
    /// Never creates one; `None` when no such cache exists.
    fn get_cache(&self, name: &str) -> Option<CacheHandle>;

    /// Create a cache bounded by `max_elements` heap-held entries
    ///
    /// `ttl_seconds < 1` provisions an eternal cache; otherwise entries
    /// expire `ttl_seconds` seconds after write. The handle is returned
    /// with management and statistics instrumentation enabled.
    fn create_cache(
        &self,
        name: &str,
        ttl_seconds: i64,
        max_elements: u64,
    ) -> Result<CacheHandle>;

    /// Typed convenience over [`create_cache`](Self::create_cache)
    ///
    /// Provisions the same cache and hands back a serde-typed view instead
    /// of the universal pair.
    fn create_cache_typed<K, V>(
        &self,
        name: &str,
        ttl_seconds: i64,
        max_elements: u64,
    ) -> Result<TypedCache<K, V>>
    where
        Self: Sized,
        K: Serialize,
        V: Serialize + DeserializeOwned,
    {
        Ok(self.create_cache(name, ttl_seconds, max_elements)?.typed())
    }
}

/// Default provisioner over a shared [`CacheManager`]
///
/// Creation runs under a per-instance mutex: the configure-register-
/// instrument sequence is one critical section, so concurrent creations
/// through the same provisioner are serialized. Lookups bypass the lock
/// entirely.
pub struct DefaultCacheProvisioner {
    manager: Arc<CacheManager>,
    create_lock: Mutex<()>,
}

impl DefaultCacheProvisioner {
    /// Provisioner over a manager opened from the default merged resource
    pub fn new() -> Result<Self> {
        Self::from_resource(MERGED_CONFIG_RESOURCE_URI)
    }

    /// Provisioner over a manager opened from an explicit resource
    pub fn from_resource(resource_uri: impl Into<String>) -> Result<Self> {
        Ok(Self::with_manager(Arc::new(CacheManager::from_resource(
            resource_uri,
        )?)))
    }

    /// Provisioner over an externally owned manager
    pub fn with_manager(manager: Arc<CacheManager>) -> Self {
        Self {
            manager,
            create_lock: Mutex::new(()),
        }
    }

    /// The manager this provisioner serves
    pub fn manager(&self) -> &Arc<CacheManager> {
        &self.manager
    }
}

impl CacheProvisioner for DefaultCacheProvisioner {
    fn get_cache(&self, name: &str) -> Option<CacheHandle> {
        self.manager.lookup(name)
    }

    fn create_cache(
        &self,
        name: &str,
        ttl_seconds: i64,
        max_elements: u64,
    ) -> Result<CacheHandle> {
        let _guard = self.create_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let expiry = ExpiryPolicy::from_ttl_seconds(ttl_seconds);
        let spec = CacheSpec::new(name)
            .with_max_elements(max_elements)
            .with_expiry(expiry);

        let handle = self.manager.register(name, spec)?;
        handle.set_management_enabled(true);
        handle.set_statistics_enabled(true);

        tracing::debug!(
            cache = name,
            ttl_seconds,
            max_elements,
            eternal = expiry.is_eternal(),
            "cache provisioned"
        );
        Ok(handle)
    }
}

impl std::fmt::Debug for DefaultCacheProvisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCacheProvisioner")
            .field("manager", &self.manager)
            .finish()
    }
}
