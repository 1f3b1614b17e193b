//! Tests for MemoryStore

mod common;

use common::{bool_ruleset, conflicting_ruleset, product_ruleset};
use std::sync::Arc;
use verdict_core::ErrorKind;
use verdict_repository::{Context, MemoryStore, Store, WritableStore};

#[tokio::test]
async fn test_missing_key() {
    let store = MemoryStore::new();
    let err = store.get(&Context::background(), "missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RulesetNotFound);
}

#[tokio::test]
async fn test_versions_increment() {
    let store = MemoryStore::new();
    let ctx = Context::background();

    let v1 = store.put(&ctx, "shop/pricing", product_ruleset("a", "1")).await.unwrap();
    let v2 = store.put(&ctx, "shop/pricing", product_ruleset("b", "2")).await.unwrap();
    assert_eq!(v1.version, "1");
    assert_eq!(v2.version, "2");

    let latest = store.get(&ctx, "shop/pricing").await.unwrap();
    assert_eq!(latest.version, "2");
    assert_eq!(*latest.ruleset, product_ruleset("b", "2"));

    let first = store.get_version(&ctx, "shop/pricing", "1").await.unwrap();
    assert_eq!(*first.ruleset, product_ruleset("a", "1"));
}

#[tokio::test]
async fn test_missing_version() {
    let store = MemoryStore::new();
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();

    let err = store.get_version(&ctx, "k", "9").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RulesetVersionNotFound);

    let err = store.get_version(&ctx, "other", "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RulesetNotFound);
}

#[tokio::test]
async fn test_signature_change_rejected() {
    let store = MemoryStore::new();
    let ctx = Context::background();
    store.put(&ctx, "k", product_ruleset("a", "1")).await.unwrap();

    let err = store.put(&ctx, "k", conflicting_ruleset()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    let err = store.put(&ctx, "k", bool_ruleset()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);

    assert_eq!(store.get(&ctx, "k").await.unwrap().version, "1");
}

#[tokio::test]
async fn test_cancelled_put_leaves_no_key() {
    let store = MemoryStore::new();
    let ctx = Context::background();
    let (cancelled, handle) = ctx.with_cancel();
    handle.cancel();
    assert!(store.put(&cancelled, "k", bool_ruleset()).await.is_err());
    assert!(store.list(&ctx, "").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_sorted_with_prefix() {
    let store = MemoryStore::new();
    let ctx = Context::background();
    for key in ["shop/b", "shop/a", "bank/z"] {
        store.put(&ctx, key, bool_ruleset()).await.unwrap();
    }
    assert_eq!(store.list(&ctx, "shop/").await.unwrap(), vec!["shop/a", "shop/b"]);
    assert_eq!(store.list(&ctx, "").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_cancelled_context() {
    let store = MemoryStore::new();
    let (ctx, handle) = Context::background().with_cancel();
    handle.cancel();
    let err = store.get(&ctx, "k").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_concurrent_puts_get_distinct_versions() {
    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .put(&Context::background(), "k", product_ruleset(&i.to_string(), "r"))
                .await
                .unwrap()
                .version
        }));
    }
    let mut versions = Vec::new();
    for handle in handles {
        versions.push(handle.await.unwrap().parse::<u32>().unwrap());
    }
    versions.sort_unstable();
    assert_eq!(versions, (1..=20).collect::<Vec<_>>());
}
