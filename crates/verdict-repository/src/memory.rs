//! In-memory store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use verdict_core::Ruleset;

use crate::error::RepositoryError;
use crate::traits::check_signature;
use crate::{Context, RepositoryResult, RulesetEntry, Store, WritableStore};

/// Concurrent in-memory versioned store
///
/// Readers share the lock; a put holds the write lock while it checks the
/// signature and appends, so versions are assigned without gaps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<RulesetEntry>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, ctx: &Context, key: &str) -> RepositoryResult<RulesetEntry> {
        ctx.run(async {
            let entries = self.entries.read().await;
            let entry = entries
                .get(key)
                .and_then(|versions| versions.last())
                .cloned()
                .ok_or_else(|| RepositoryError::not_found(key))?;
            tracing::debug!(key, version = %entry.version, "fetched ruleset from memory");
            Ok(entry)
        })
        .await
    }

    async fn get_version(
        &self,
        ctx: &Context,
        key: &str,
        version: &str,
    ) -> RepositoryResult<RulesetEntry> {
        ctx.run(async {
            let entries = self.entries.read().await;
            let versions = entries
                .get(key)
                .ok_or_else(|| RepositoryError::not_found(key))?;
            versions
                .iter()
                .find(|entry| entry.version == version)
                .cloned()
                .ok_or_else(|| RepositoryError::version_not_found(key, version))
        })
        .await
    }
}

#[async_trait]
impl WritableStore for MemoryStore {
    async fn put(
        &self,
        ctx: &Context,
        key: &str,
        ruleset: Ruleset,
    ) -> RepositoryResult<RulesetEntry> {
        ctx.run(async {
            let mut entries = self.entries.write().await;
            check_signature(entries.get(key).and_then(|v| v.last()), &ruleset)?;
            let versions = entries.entry(key.to_string()).or_default();

            let version = (versions.len() + 1).to_string();
            let entry = RulesetEntry::new(key, version, Arc::new(ruleset));
            versions.push(entry.clone());
            tracing::debug!(key, version = %entry.version, "stored ruleset in memory");
            Ok(entry)
        })
        .await
    }

    async fn list(&self, ctx: &Context, prefix: &str) -> RepositoryResult<Vec<String>> {
        ctx.run(async {
            let entries = self.entries.read().await;
            let mut keys: Vec<String> = entries
                .keys()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect();
            keys.sort();
            Ok(keys)
        })
        .await
    }
}
