//! Builder pattern for Client

use std::sync::Arc;
use std::time::Duration;
use verdict_repository::{CacheConfig, CachedStore, Store};

use crate::client::Client;
use crate::config::{CacheSettings, ClientConfig};
use crate::error::Result;

/// Builder for [`Client`]
///
/// # Example
///
/// ```rust,no_run
/// use verdict_repository::StoreConfig;
/// use verdict_sdk::ClientBuilder;
///
/// # fn demo() -> verdict_sdk::Result<()> {
/// // From configuration
/// let client = ClientBuilder::new()
///     .with_store_config(StoreConfig::file_system("rulesets"))
///     .build()?;
///
/// // Injected store, no cache
/// let store = verdict_repository::MemoryStore::new();
/// let client = ClientBuilder::new().with_store(store).without_cache().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    store: Option<Arc<dyn Store>>,
}

impl ClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Select the store backend by configuration
    pub fn with_store_config(mut self, store: verdict_repository::StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Use an existing store. Takes precedence over the store configuration.
    pub fn with_store<S: Store + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set cache settings
    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set cache settings from a repository cache configuration
    pub fn with_cache_config(mut self, cache: CacheConfig) -> Self {
        self.config.cache = CacheSettings::from(&cache);
        self
    }

    /// Disable caching
    pub fn without_cache(mut self) -> Self {
        self.config.cache.enabled = false;
        self
    }

    /// Apply a deadline to every store fetch
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        let store: Arc<dyn Store> = match self.store {
            Some(store) => store,
            None => Arc::new(self.config.store.open()?),
        };

        let cache = self.config.cache.enabled.then(|| {
            Arc::new(CachedStore::with_cache_config(
                store.clone(),
                self.config.cache.to_cache_config(),
            ))
        });
        let store: Arc<dyn Store> = match &cache {
            Some(cache) => cache.clone(),
            None => store,
        };

        tracing::info!(
            store = ?self.config.store,
            cached = cache.is_some(),
            fetch_timeout_ms = ?self.config.fetch_timeout_ms,
            "client built"
        );
        Ok(Client::new(store, cache, self.config.fetch_timeout()))
    }
}
