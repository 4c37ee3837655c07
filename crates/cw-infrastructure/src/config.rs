//! Configuration loading for cache managers
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values, merged in that order with Figment.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cw_domain::error::{Error, Result};
use cw_domain::ports::cache::DEFAULT_MAX_ELEMENTS;

/// Canonical identifier of the merged configuration resource
///
/// Managers opened with this URI read the conventional
/// [`DEFAULT_CONFIG_FILENAME`] from the working directory (when present),
/// merged with `CACHEWARDEN_*` environment variables.
pub const MERGED_CONFIG_RESOURCE_URI: &str = "cachewarden:merged-toml-resource";

/// Conventional configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cachewarden.toml";

/// Environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "CACHEWARDEN";

/// Top-level configuration for a cache manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Backend to resolve from the registry
    pub backend: String,

    /// Caches registered when the manager is opened
    #[serde(default)]
    pub caches: Vec<PreconfiguredCache>,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            backend: "moka".to_string(),
            caches: Vec::new(),
        }
    }
}

/// One cache declared in the configuration resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreconfiguredCache {
    /// Cache name
    pub name: String,

    /// TTL in seconds; values below 1 make the cache eternal
    #[serde(default)]
    pub ttl_seconds: i64,

    /// Maximum number of heap-held entries
    #[serde(default = "default_max_elements")]
    pub max_elements: u64,

    /// Enable management instrumentation
    #[serde(default = "default_true")]
    pub management: bool,

    /// Enable statistics instrumentation
    #[serde(default = "default_true")]
    pub statistics: bool,
}

fn default_max_elements() -> u64 {
    DEFAULT_MAX_ELEMENTS
}

fn default_true() -> bool {
    true
}

/// Configuration loader for a resource URI
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    resource_uri: String,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a loader for the given resource URI
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `WardenConfig::default()`
    /// 2. The TOML file the resource URI resolves to (if it exists)
    /// 3. Environment variables with the configured prefix
    pub fn load(&self) -> Result<WardenConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(WardenConfig::default()));

        let path = self.config_path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "merging configuration file");
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::debug!(path = %path.display(), "configuration file absent, using defaults");
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)));

        figment.extract().map_err(|e| Error::Configuration {
            message: format!(
                "failed to extract configuration from '{}'",
                self.resource_uri
            ),
            source: Some(Box::new(e)),
        })
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &WardenConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| Error::Configuration {
            message: "failed to serialize configuration to TOML".to_string(),
            source: Some(Box::new(e)),
        })?;
        std::fs::write(path.as_ref(), toml_string)?;
        Ok(())
    }

    /// The path this loader's resource URI resolves to
    ///
    /// The merged-resource URI resolves to the conventional file in the
    /// working directory; `file:` URIs and bare paths name the file
    /// directly.
    pub fn config_path(&self) -> PathBuf {
        if self.resource_uri == MERGED_CONFIG_RESOURCE_URI {
            PathBuf::from(DEFAULT_CONFIG_FILENAME)
        } else if let Some(path) = self.resource_uri.strip_prefix("file:") {
            PathBuf::from(path)
        } else {
            PathBuf::from(self.resource_uri.as_str())
        }
    }

    /// The resource URI this loader reads
    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }
}
