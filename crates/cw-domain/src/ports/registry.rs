//! Cache Backend Registry
//!
//! Auto-registration system for cache backends. Backend crates register
//! themselves via a linkme distributed slice and are resolved at runtime
//! by name from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::cache::CacheBackend;

/// Configuration for cache backend creation
///
/// Contains the options a backend might need. Backends use what they need
/// and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct CacheBackendConfig {
    /// Backend name (e.g., "moka", "null")
    pub backend: String,
    /// Resource URI the owning manager was opened with
    pub uri: Option<String>,
    /// Additional backend-specific configuration
    pub extra: HashMap<String, String>,
}

impl CacheBackendConfig {
    /// Create a new config with the given backend name
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Default::default()
        }
    }

    /// Set the resource URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for cache backends
///
/// Each backend implementation registers itself with this entry. The entry
/// contains metadata and a factory function to create backend instances.
pub struct CacheBackendEntry {
    /// Unique backend name (e.g., "moka", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a backend instance
    pub factory: fn(&CacheBackendConfig) -> Result<Arc<dyn CacheBackend>, String>,
}

// Auto-collection via linkme distributed slices - backends submit entries
// at compile time
#[linkme::distributed_slice]
pub static CACHE_BACKENDS: [CacheBackendEntry] = [..];

/// Resolve a cache backend by name from the registry
///
/// Searches the registry for a backend matching the configured name and
/// creates an instance using the backend's factory function.
pub fn resolve_cache_backend(
    config: &CacheBackendConfig,
) -> Result<Arc<dyn CacheBackend>, String> {
    for entry in CACHE_BACKENDS {
        if entry.name == config.backend {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = CACHE_BACKENDS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown cache backend '{}'. Available backends: {:?}",
        config.backend, available
    ))
}

/// List all registered cache backends
///
/// Returns (name, description) tuples for every registered backend.
pub fn list_cache_backends() -> Vec<(&'static str, &'static str)> {
    CACHE_BACKENDS.iter().map(|e| (e.name, e.description)).collect()
}
