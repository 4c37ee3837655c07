//! Cache manager owning the namespace of live caches

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use cw_domain::error::{Error, Result};
use cw_domain::ports::cache::{CacheBackend, CacheSpec};
use cw_domain::ports::registry::{CacheBackendConfig, resolve_cache_backend};

use crate::config::{ConfigLoader, MERGED_CONFIG_RESOURCE_URI, WardenConfig};
use crate::handle::CacheHandle;

/// Process-wide owner of named caches and their backing stores
///
/// Initialized once at application startup and closed at shutdown. Lookups
/// take a shared lock; registration is register-if-absent under the write
/// lock, so a completed registration is visible to every later lookup and
/// a duplicate name can never be registered twice.
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
    resource_uri: String,
    registry: RwLock<HashMap<String, CacheHandle>>,
    closed: AtomicBool,
}

impl CacheManager {
    /// Create a manager over an explicit backend
    ///
    /// `resource_uri` identifies the configuration resource this manager
    /// was opened with and is recorded for diagnostics.
    pub fn new(backend: Arc<dyn CacheBackend>, resource_uri: impl Into<String>) -> Self {
        let resource_uri = resource_uri.into();
        tracing::info!(
            backend = backend.backend_name(),
            resource = %resource_uri,
            "cache manager opened"
        );
        Self {
            backend,
            resource_uri,
            registry: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a manager over the default in-memory backend
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(cw_providers::MokaBackend::new()),
            MERGED_CONFIG_RESOURCE_URI,
        )
    }

    /// Create a manager from a merged configuration resource
    ///
    /// Loads [`WardenConfig`] from the resource, resolves the configured
    /// backend through the registry, and pre-registers any caches declared
    /// in the configuration.
    pub fn from_resource(resource_uri: impl Into<String>) -> Result<Self> {
        let resource_uri = resource_uri.into();
        let config = ConfigLoader::new(&resource_uri).load()?;
        Self::from_config(config, resource_uri)
    }

    /// Create a manager from an already-loaded configuration
    pub fn from_config(config: WardenConfig, resource_uri: impl Into<String>) -> Result<Self> {
        let resource_uri = resource_uri.into();
        let backend_config =
            CacheBackendConfig::new(config.backend.as_str()).with_uri(resource_uri.as_str());
        let backend = resolve_cache_backend(&backend_config)
            .map_err(Error::configuration)?;

        let manager = Self::new(backend, resource_uri);
        for declared in &config.caches {
            let spec = CacheSpec::new(declared.name.as_str())
                .with_max_elements(declared.max_elements)
                .with_ttl_seconds(declared.ttl_seconds);
            let handle = manager.register(&declared.name, spec)?;
            handle.set_management_enabled(declared.management);
            handle.set_statistics_enabled(declared.statistics);
        }
        Ok(manager)
    }

    /// Look up an existing cache by name
    ///
    /// Read-only; returns `None` for unknown names and on a closed manager.
    pub fn lookup(&self, name: &str) -> Option<CacheHandle> {
        if self.is_closed() {
            return None;
        }
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Register a new cache under `name`
    ///
    /// Register-if-absent: the occupancy check, store construction and
    /// registry insert all happen under one write lock. Backend failures
    /// propagate unmodified and leave the registry untouched.
    pub fn register(&self, name: &str, spec: CacheSpec) -> Result<CacheHandle> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        if self.is_closed() {
            return Err(Error::ManagerClosed);
        }
        if registry.contains_key(name) {
            return Err(Error::CacheExists {
                name: name.to_string(),
            });
        }

        let store = self.backend.open_store(&spec)?;
        let handle = CacheHandle::new(spec, self.backend.backend_name(), store);
        registry.insert(name.to_string(), handle.clone());
        tracing::info!(
            cache = name,
            backend = self.backend.backend_name(),
            "cache registered"
        );
        Ok(handle)
    }

    /// Destroy the cache registered under `name`
    ///
    /// Clears the store and frees the name for re-registration. Returns
    /// whether a cache existed.
    pub fn destroy(&self, name: &str) -> Result<bool> {
        if self.is_closed() {
            return Err(Error::ManagerClosed);
        }
        let removed = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        match removed {
            Some(handle) => {
                handle.clear()?;
                tracing::info!(cache = name, "cache destroyed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Names of all registered caches
    pub fn cache_names(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// The resource identifier this manager was opened with
    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    /// Name of the backing engine
    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Close the manager
    ///
    /// Idempotent. Clears every store, empties the registry and marks the
    /// manager closed; registration fails and lookups return `None`
    /// afterwards.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        for (name, handle) in registry.drain() {
            if let Err(error) = handle.clear() {
                tracing::warn!(cache = %name, %error, "failed to clear store during close");
            }
        }
        tracing::info!(resource = %self.resource_uri, "cache manager closed");
    }
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("backend", &self.backend.backend_name())
            .field("resource_uri", &self.resource_uri)
            .field("closed", &self.is_closed())
            .finish()
    }
}
