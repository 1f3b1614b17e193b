//! TTL caching decorator for any store
//!
//! Caching never changes what a fetch returns, only how often the inner
//! store is asked. Latest-version lookups are cached for the TTL; a `put`
//! through the decorator drops the key's entries immediately. A cancelled or
//! expired context fails before the cache is consulted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use verdict_core::Ruleset;

use crate::models::CachedArtifact;
use crate::{
    CacheConfig, CacheStats, CacheableStore, Context, RepositoryResult, RulesetEntry, Store,
    WritableStore,
};

/// Cache key: store key plus the requested version (`None` for latest)
type CacheKey = (String, Option<String>);

/// Caching wrapper around a store
pub struct CachedStore<S> {
    inner: S,
    cache: RwLock<HashMap<CacheKey, CachedArtifact<RulesetEntry>>>,
    config: CacheConfig,
    stats: Mutex<CacheStats>,
}

impl<S> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_cache_config(inner, CacheConfig::default())
    }

    pub fn with_cache_config(inner: S, config: CacheConfig) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
            config,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.config
    }

    fn with_stats<R>(&self, update: impl FnOnce(&mut CacheStats) -> R) -> R {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut stats)
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CachedArtifact<RulesetEntry>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CachedArtifact<RulesetEntry>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check cache and potentially return a live entry
    fn check_cache(&self, key: &CacheKey) -> Option<RulesetEntry> {
        if !self.config.enabled {
            return None;
        }

        let hit = self
            .read_cache()
            .get(key)
            .filter(|cached| !cached.is_expired())
            .map(|cached| cached.data.clone());

        match hit {
            Some(entry) => {
                self.with_stats(|s| s.hits += 1);
                tracing::debug!(key = %key.0, "ruleset cache hit");
                Some(entry)
            }
            None => {
                self.with_stats(|s| s.misses += 1);
                tracing::debug!(key = %key.0, "ruleset cache miss");
                None
            }
        }
    }

    /// Store in cache, evicting expired entries and then the oldest when full
    fn store_in_cache(&self, key: CacheKey, entry: RulesetEntry) {
        if !self.config.enabled {
            return;
        }

        let mut cache = self.write_cache();
        if let Some(max) = self.config.max_entries {
            if max == 0 {
                return;
            }
            if !cache.contains_key(&key) && cache.len() >= max {
                cache.retain(|_, cached| !cached.is_expired());
                while cache.len() >= max {
                    let oldest = cache
                        .iter()
                        .min_by_key(|(_, cached)| cached.cached_at)
                        .map(|(k, _)| k.clone());
                    match oldest {
                        Some(oldest) => cache.remove(&oldest),
                        None => break,
                    };
                }
            }
        }
        cache.insert(key, CachedArtifact::new(entry, self.config.default_ttl));

        let size = cache.len();
        self.with_stats(|s| s.size = size);
    }
}

#[async_trait]
impl<S: Store> Store for CachedStore<S> {
    async fn get(&self, ctx: &Context, key: &str) -> RepositoryResult<RulesetEntry> {
        // A done context fails even when the entry is cached
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        let cache_key = (key.to_string(), None);
        if let Some(entry) = self.check_cache(&cache_key) {
            return Ok(entry);
        }
        let entry = self.inner.get(ctx, key).await?;
        self.store_in_cache(cache_key, entry.clone());
        Ok(entry)
    }

    async fn get_version(
        &self,
        ctx: &Context,
        key: &str,
        version: &str,
    ) -> RepositoryResult<RulesetEntry> {
        // A done context fails even when the entry is cached
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        let cache_key = (key.to_string(), Some(version.to_string()));
        if let Some(entry) = self.check_cache(&cache_key) {
            return Ok(entry);
        }
        let entry = self.inner.get_version(ctx, key, version).await?;
        self.store_in_cache(cache_key, entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl<S: WritableStore> WritableStore for CachedStore<S> {
    async fn put(
        &self,
        ctx: &Context,
        key: &str,
        ruleset: Ruleset,
    ) -> RepositoryResult<RulesetEntry> {
        let entry = self.inner.put(ctx, key, ruleset).await?;
        self.invalidate(key);
        Ok(entry)
    }

    async fn list(&self, ctx: &Context, prefix: &str) -> RepositoryResult<Vec<String>> {
        self.inner.list(ctx, prefix).await
    }
}

impl<S> CacheableStore for CachedStore<S> {
    fn clear_cache(&self) {
        self.write_cache().clear();
        self.with_stats(|s| s.size = 0);
    }

    fn invalidate(&self, key: &str) {
        let mut cache = self.write_cache();
        cache.retain(|(cached_key, _), _| cached_key != key);
        let size = cache.len();
        self.with_stats(|s| s.size = size);
    }

    fn cache_stats(&self) -> CacheStats {
        self.with_stats(|s| s.clone())
    }
}
