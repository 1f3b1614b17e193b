//! Tests for the caching decorator

mod common;

use common::product_ruleset;
use std::time::Duration;
use verdict_core::ErrorKind;
use verdict_repository::{
    CacheConfig, CacheableStore, CachedStore, Context, MemoryStore, Store, WritableStore,
};

#[tokio::test]
async fn test_hits_and_misses() {
    let store = CachedStore::new(MemoryStore::new());
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();

    store.get(&ctx, "k").await.unwrap();
    store.get(&ctx, "k").await.unwrap();
    store.get_version(&ctx, "k", "1").await.unwrap();

    let stats = store.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.size, 2);
}

#[tokio::test]
async fn test_put_through_cache_invalidates() {
    let store = CachedStore::new(MemoryStore::new());
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "1");

    store.put(&ctx, "k", product_ruleset("b", "2")).await.unwrap();
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "2");
}

#[tokio::test]
async fn test_ttl_expiry_sees_inner_writes() {
    let store = CachedStore::with_cache_config(
        MemoryStore::new(),
        CacheConfig::new().with_ttl(Duration::from_millis(20)),
    );
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "1");

    // Bypass the decorator
    store.inner().put(&ctx, "k", product_ruleset("b", "2")).await.unwrap();
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "1");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "2");
}

#[tokio::test]
async fn test_invalidate_and_clear() {
    let store = CachedStore::new(MemoryStore::new());
    let ctx = Context::background();
    store.put(&ctx, "a", product_ruleset("a", "1")).await.unwrap();
    store.put(&ctx, "b", product_ruleset("b", "1")).await.unwrap();
    store.get(&ctx, "a").await.unwrap();
    store.get(&ctx, "b").await.unwrap();
    assert_eq!(store.cache_stats().size, 2);

    store.invalidate("a");
    assert_eq!(store.cache_stats().size, 1);
    store.clear_cache();
    assert_eq!(store.cache_stats().size, 0);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let store = CachedStore::new(MemoryStore::new());
    let ctx = Context::background();

    let err = store.get(&ctx, "k").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RulesetNotFound);
    assert_eq!(store.cache_stats().size, 0);

    store.inner().put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();
    assert!(store.get(&ctx, "k").await.is_ok());
}

#[tokio::test]
async fn test_max_entries_evicts_oldest() {
    let store = CachedStore::with_cache_config(
        MemoryStore::new(),
        CacheConfig::new().with_max_entries(2),
    );
    let ctx = Context::background();
    for key in ["a", "b", "c"] {
        store.put(&ctx, key, product_ruleset(key, "1")).await.unwrap();
        store.get(&ctx, key).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert_eq!(store.cache_stats().size, 2);

    // "a" was evicted, so fetching it again misses
    let misses = store.cache_stats().misses;
    store.get(&ctx, "a").await.unwrap();
    assert_eq!(store.cache_stats().misses, misses + 1);
}

#[tokio::test]
async fn test_disabled_cache_passes_through() {
    let store = CachedStore::with_cache_config(MemoryStore::new(), CacheConfig::disabled());
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();
    store.get(&ctx, "k").await.unwrap();
    store.inner().put(&ctx, "k", product_ruleset("b", "2")).await.unwrap();
    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "2");
    assert_eq!(store.cache_stats(), Default::default());
}

#[tokio::test]
async fn test_done_context_fails_on_warm_cache() {
    let store = CachedStore::new(MemoryStore::new());
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();
    store.get(&ctx, "k").await.unwrap();
    store.get_version(&ctx, "k", "1").await.unwrap();

    let (cancelled, handle) = ctx.with_cancel();
    handle.cancel();
    let err = store.get(&cancelled, "k").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let err = store.get_version(&cancelled, "k", "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);

    let expired = ctx.with_deadline(tokio::time::Instant::now());
    let err = store.get(&expired, "k").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);

    // Neither call counted as a cache lookup
    assert_eq!(store.cache_stats().hits, 0);
}
