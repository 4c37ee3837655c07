//! Domain layer for CacheWarden
//!
//! Core types and contracts: the error taxonomy, the expiry policy value
//! object, and the ports implemented by cache backends. No engine code
//! lives here; backend implementations are in `cw-providers`.

pub mod error;
pub mod expiry;
pub mod ports;

pub use error::{Error, Result};
pub use expiry::ExpiryPolicy;
pub use ports::cache::{CacheBackend, CacheSpec, CacheStats, CacheStore};
pub use ports::registry::{CacheBackendConfig, CacheBackendEntry};
