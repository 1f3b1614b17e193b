//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use std::sync::Arc;
use verdict_repository::{Context, MemoryStore, WritableStore};
use verdict_sdk::{Client, ClientBuilder};

/// Test helper that seeds a memory store from inline s-expressions
pub struct TestClient {
    store: Arc<MemoryStore>,
}

impl TestClient {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Store a new version of `key` parsed from s-expression source
    pub async fn with_ruleset(self, key: &str, source: &str) -> Self {
        let ruleset = verdict_parser::parse_ruleset(source).expect("ruleset should parse");
        self.store
            .put(&Context::background(), key, ruleset)
            .await
            .expect("ruleset should store");
        self
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        self.store.clone()
    }

    /// Client over the seeded store, caching disabled
    pub fn client(&self) -> Client {
        ClientBuilder::new()
            .with_store(self.store.clone())
            .without_cache()
            .build()
            .expect("client should build")
    }
}

/// Discount ruleset keyed on `product-id`
pub const DISCOUNT: &str = r#"
(ruleset int64
  (rule (eq (param "product-id" "string") "a") 10)
  (rule (eq (param "product-id" "string") "b") 20))
"#;
