//! Cache Backend Implementations
//!
//! Storage engines behind the `cw-domain` backend port.
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`NullBackend`] | Testing | No-op stub that stores nothing |
//! | [`MokaBackend`] | Local | Heap-resident stores (high performance) |
//!
//! ## Backend Selection Guide
//!
//! - **Development/Testing**: use `NullBackend` to disable caching
//! - **Single Instance**: use `MokaBackend` for bounded in-memory caches

#[cfg(feature = "backend-moka")]
pub mod moka;
pub mod null;

// Re-export for convenience
#[cfg(feature = "backend-moka")]
pub use moka::{MokaBackend, MokaStore};
pub use null::{NullBackend, NullStore};
