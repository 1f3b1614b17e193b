//! Fetch-then-evaluate client

use std::sync::Arc;
use std::time::Duration;
use verdict_core::{Params, Ruleset, Value, ValueType};
use verdict_repository::{
    CacheStats, CacheableStore, CachedStore, Context, RulesetEntry, Store,
};
use verdict_runtime::Evaluator;

use crate::error::{Result, SdkError};

pub(crate) type SharedCache = Arc<CachedStore<Arc<dyn Store>>>;

/// Per-call options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Evaluate this version instead of the latest
    pub version: Option<String>,
}

impl EvalOptions {
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
        }
    }
}

/// Result of evaluating a stored ruleset
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub value: Value,
    /// Zero-based index of the rule that produced `value`
    pub matched_rule: usize,
    /// Version of the ruleset that was evaluated
    pub version: String,
}

/// Client for fetching and evaluating rulesets by key
///
/// Cloning is cheap; clones share the store and its cache.
#[derive(Clone)]
pub struct Client {
    store: Arc<dyn Store>,
    cache: Option<SharedCache>,
    evaluator: Evaluator,
    fetch_timeout: Option<Duration>,
}

impl Client {
    pub(crate) fn new(
        store: Arc<dyn Store>,
        cache: Option<SharedCache>,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            cache,
            evaluator: Evaluator::new(),
            fetch_timeout,
        }
    }

    /// Fetch the latest version of a ruleset
    pub async fn get(&self, ctx: &Context, key: &str) -> Result<RulesetEntry> {
        self.get_with(ctx, key, &EvalOptions::default()).await
    }

    /// Fetch a ruleset, honoring `opts.version`
    pub async fn get_with(
        &self,
        ctx: &Context,
        key: &str,
        opts: &EvalOptions,
    ) -> Result<RulesetEntry> {
        let ctx = match self.fetch_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx.clone(),
        };

        let entry = match &opts.version {
            Some(version) => self.store.get_version(&ctx, key, version).await?,
            None => self.store.get(&ctx, key).await?,
        };
        Ok(entry)
    }

    /// Fetch the latest version of `key` and evaluate it against `params`
    pub async fn evaluate(&self, ctx: &Context, key: &str, params: &Params) -> Result<EvalResult> {
        self.evaluate_with(ctx, key, params, &EvalOptions::default())
            .await
    }

    #[tracing::instrument(skip(self, ctx, params, opts), fields(version = ?opts.version))]
    pub async fn evaluate_with(
        &self,
        ctx: &Context,
        key: &str,
        params: &Params,
        opts: &EvalOptions,
    ) -> Result<EvalResult> {
        let entry = self.get_with(ctx, key, opts).await?;
        self.evaluate_entry(&entry, params)
    }

    fn evaluate_entry(&self, entry: &RulesetEntry, params: &Params) -> Result<EvalResult> {
        let evaluation = self.evaluator.evaluate(&entry.ruleset, params)?;
        tracing::debug!(
            key = %entry.key,
            version = %entry.version,
            rule = evaluation.matched_rule,
            "ruleset evaluated"
        );
        Ok(EvalResult {
            value: evaluation.value,
            matched_rule: evaluation.matched_rule,
            version: entry.version.clone(),
        })
    }

    /// Fetch, check the result type, then evaluate
    async fn evaluate_typed(
        &self,
        ctx: &Context,
        key: &str,
        params: &Params,
        expected: ValueType,
    ) -> Result<Value> {
        let entry = self.get(ctx, key).await?;
        expect_result_type(&entry.ruleset, expected)?;
        Ok(self.evaluate_entry(&entry, params)?.value)
    }

    pub async fn get_string(&self, ctx: &Context, key: &str, params: &Params) -> Result<String> {
        match self.evaluate_typed(ctx, key, params, ValueType::String).await? {
            Value::String(s) => Ok(s),
            other => Err(unexpected(ValueType::String, &other)),
        }
    }

    pub async fn get_bool(&self, ctx: &Context, key: &str, params: &Params) -> Result<bool> {
        match self.evaluate_typed(ctx, key, params, ValueType::Bool).await? {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected(ValueType::Bool, &other)),
        }
    }

    pub async fn get_int64(&self, ctx: &Context, key: &str, params: &Params) -> Result<i64> {
        match self.evaluate_typed(ctx, key, params, ValueType::Int64).await? {
            Value::Int64(n) => Ok(n),
            other => Err(unexpected(ValueType::Int64, &other)),
        }
    }

    pub async fn get_float64(&self, ctx: &Context, key: &str, params: &Params) -> Result<f64> {
        match self.evaluate_typed(ctx, key, params, ValueType::Float64).await? {
            Value::Float64(f) => Ok(f),
            other => Err(unexpected(ValueType::Float64, &other)),
        }
    }

    /// Cache statistics, `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.cache_stats())
    }

    /// Drop cached entries for `key`
    pub fn invalidate(&self, key: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(key);
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("cached", &self.cache.is_some())
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

fn expect_result_type(ruleset: &Ruleset, expected: ValueType) -> Result<()> {
    let actual = ruleset.result_type();
    if actual == expected {
        Ok(())
    } else {
        Err(SdkError::TypeMismatch { expected, actual })
    }
}

fn unexpected(expected: ValueType, value: &Value) -> SdkError {
    SdkError::TypeMismatch {
        expected,
        actual: value.value_type(),
    }
}
