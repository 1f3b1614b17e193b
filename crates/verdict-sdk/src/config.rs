//! Configuration types for the client
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `config/verdict.{toml,yaml,json}` file, then `VERDICT_*` environment
//! variables (nested fields separated by `__`, e.g. `VERDICT_STORE__KIND`).
//! A `.env` file is loaded into the environment first when present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use verdict_repository::{CacheConfig, StoreConfig};

use crate::error::Result;

const DEFAULT_CONFIG_FILE: &str = "config/verdict";
const ENV_PREFIX: &str = "VERDICT";

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Store backend
    pub store: StoreConfig,

    /// Caching in front of the store
    pub cache: CacheSettings,

    /// Deadline applied to every store fetch, in milliseconds
    pub fetch_timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `.env`, the default config file and the
    /// environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, still honoring the
    /// environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(?config, "loaded client configuration");
        Ok(config)
    }

    /// Set the store backend
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Set cache settings
    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.cache = cache;
        self
    }

    /// Set the fetch deadline
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

/// Cache settings in configuration-friendly units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    /// `None` means unbounded
    pub max_entries: Option<usize>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl CacheSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            enabled: self.enabled,
            default_ttl: Duration::from_secs(self.ttl_secs),
            max_entries: self.max_entries,
        }
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ttl_secs: config.default_ttl.as_secs(),
            max_entries: config.max_entries,
        }
    }
}
