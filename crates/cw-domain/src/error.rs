//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CacheWarden
#[derive(Error, Debug)]
pub enum Error {
    /// A cache is already registered under the requested name
    #[error("cache '{name}' already exists")]
    CacheExists {
        /// Name of the occupied registry slot
        name: String,
    },

    /// The backing engine rejected the requested resource bounds
    #[error("invalid resource pool: {message}")]
    ResourcePool {
        /// Description of the rejected bound
        message: String,
    },

    /// Operation attempted on a closed cache manager
    #[error("cache manager is closed")]
    ManagerClosed,

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Backing engine failure
    #[error("backend error: {message}")]
    Backend {
        /// Description of the backend failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error without a source
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error without a source
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }
}
