//! Core trait definitions for stores
//!
//! This module defines three key traits:
//!
//! - [`Store`]: read-only interface for fetching rulesets by key
//! - [`WritableStore`]: extension for creating new versions and listing keys
//! - [`CacheableStore`]: extension for cache management
//!
//! All operations take a [`Context`]; when it is cancelled or its deadline
//! passes, in-flight work is abandoned and `Cancelled` / `DeadlineExceeded`
//! is returned.

use async_trait::async_trait;
use std::sync::Arc;
use verdict_core::Ruleset;

use crate::{CacheStats, Context, RepositoryResult, RulesetEntry};

/// Read access to rulesets
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait Store: Send + Sync {
    /// Latest version stored at `key`, or `NotFound`
    async fn get(&self, ctx: &Context, key: &str) -> RepositoryResult<RulesetEntry>;

    /// A specific version, or `NotFound` / `VersionNotFound`
    async fn get_version(
        &self,
        ctx: &Context,
        key: &str,
        version: &str,
    ) -> RepositoryResult<RulesetEntry>;
}

/// Stores that accept new rulesets
#[async_trait]
pub trait WritableStore: Store {
    /// Store `ruleset` as the next version of `key`.
    ///
    /// Fails with a signature mismatch when the ruleset's signature
    /// disagrees with the key's latest version.
    async fn put(&self, ctx: &Context, key: &str, ruleset: Ruleset)
        -> RepositoryResult<RulesetEntry>;

    /// Keys starting with `prefix`, sorted
    async fn list(&self, ctx: &Context, prefix: &str) -> RepositoryResult<Vec<String>>;
}

/// Stores that keep a cache in front of another store
pub trait CacheableStore {
    /// Clear all cached entries
    fn clear_cache(&self);

    /// Drop every cached version of `key`
    fn invalidate(&self, key: &str);

    /// Get cache statistics
    fn cache_stats(&self) -> CacheStats;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn get(&self, ctx: &Context, key: &str) -> RepositoryResult<RulesetEntry> {
        (**self).get(ctx, key).await
    }

    async fn get_version(
        &self,
        ctx: &Context,
        key: &str,
        version: &str,
    ) -> RepositoryResult<RulesetEntry> {
        (**self).get_version(ctx, key, version).await
    }
}

#[async_trait]
impl<S: WritableStore + ?Sized> WritableStore for Arc<S> {
    async fn put(
        &self,
        ctx: &Context,
        key: &str,
        ruleset: Ruleset,
    ) -> RepositoryResult<RulesetEntry> {
        (**self).put(ctx, key, ruleset).await
    }

    async fn list(&self, ctx: &Context, prefix: &str) -> RepositoryResult<Vec<String>> {
        (**self).list(ctx, prefix).await
    }
}

/// Check a new ruleset's signature against the latest stored version
pub(crate) fn check_signature(
    latest: Option<&RulesetEntry>,
    ruleset: &Ruleset,
) -> RepositoryResult<()> {
    if let Some(latest) = latest {
        latest.ruleset.signature().check(&ruleset.signature())?;
    }
    Ok(())
}
