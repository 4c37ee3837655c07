//! # CacheWarden
//!
//! Programmatic provisioning of named, bounded, expiring caches over a
//! pluggable backend.
//!
//! Callers create or retrieve caches by name with explicit TTL and
//! maximum-entry-count bounds; no static configuration files are needed.
//! The backend engine is pluggable (Moka in-memory by default), and every
//! provisioned cache comes back with management and statistics
//! instrumentation enabled.
//!
//! ## Example
//!
//! ```
//! use cachewarden::{CacheManager, CacheProvisioner, DefaultCacheProvisioner};
//! use std::sync::Arc;
//!
//! # fn main() -> cachewarden::Result<()> {
//! let manager = Arc::new(CacheManager::in_memory());
//! let provisioner = DefaultCacheProvisioner::with_manager(manager);
//!
//! // 30-minute TTL, at most 500 resident entries
//! let sessions = provisioner.create_cache("sessions", 1800, 500)?;
//! assert!(sessions.is_statistics_enabled());
//!
//! // a TTL below one second provisions an eternal cache
//! let orders = provisioner.create_cache("orders", 0, 1000)?;
//! assert!(orders.spec().expiry.is_eternal());
//!
//! // lookups return the registered handle, or None
//! assert_eq!(provisioner.get_cache("orders"), Some(orders));
//! assert!(provisioner.get_cache("unknown").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `cw-domain` - error taxonomy, expiry policy, backend ports
//! - `cw-providers` - backend engines (Moka, Null)
//! - `cw-infrastructure` - cache manager, handles, provisioner, config

pub use cw_domain::error::{Error, Result};
pub use cw_domain::expiry::ExpiryPolicy;
pub use cw_domain::ports::cache::{CacheBackend, CacheSpec, CacheStats, CacheStore};
pub use cw_domain::ports::registry::{
    CacheBackendConfig, CacheBackendEntry, list_cache_backends, resolve_cache_backend,
};

pub use cw_providers::{NullBackend, NullStore};

#[cfg(feature = "backend-moka")]
pub use cw_providers::{MokaBackend, MokaStore};

pub use cw_infrastructure::config::{
    ConfigLoader, MERGED_CONFIG_RESOURCE_URI, PreconfiguredCache, WardenConfig,
};
pub use cw_infrastructure::handle::{CacheHandle, CacheManagementInfo, TypedCache, UntypedCache};
pub use cw_infrastructure::manager::CacheManager;
pub use cw_infrastructure::provision::{CacheProvisioner, DefaultCacheProvisioner};
