//! Data models for the store layer

use std::sync::Arc;
use std::time::{Duration, Instant};
use verdict_core::Ruleset;

/// A stored ruleset at one version
#[derive(Debug, Clone, PartialEq)]
pub struct RulesetEntry {
    /// Store key
    pub key: String,
    /// Version label, `"1"`, `"2"`, ... in creation order
    pub version: String,
    /// Shared, immutable ruleset
    pub ruleset: Arc<Ruleset>,
}

impl RulesetEntry {
    pub fn new(key: impl Into<String>, version: impl Into<String>, ruleset: Arc<Ruleset>) -> Self {
        Self {
            key: key.into(),
            version: version.into(),
            ruleset,
        }
    }
}

/// Join a namespace and a name into a store key
pub fn namespaced_key(namespace: &str, name: &str) -> String {
    let namespace = namespace.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", namespace, name)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries in cache
    pub size: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A cached value with TTL support
#[derive(Debug, Clone)]
pub(crate) struct CachedArtifact<T> {
    /// The cached data
    pub data: T,
    /// When this entry was cached
    pub cached_at: Instant,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl<T> CachedArtifact<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this cached entry has expired
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Whether caching is enabled
    pub enabled: bool,
    /// Default time-to-live for cache entries
    pub default_ttl: Duration,
    /// Maximum number of entries to keep in cache
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: Duration::from_secs(300), // 5 minutes
            max_entries: Some(1000),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable caching
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the default TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the maximum number of entries
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Remove the entry limit
    pub fn unlimited_entries(mut self) -> Self {
        self.max_entries = None;
        self
    }
}
