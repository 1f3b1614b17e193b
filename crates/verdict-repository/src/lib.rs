//! Store abstraction layer for the Verdict rules engine
//!
//! This crate provides a unified interface for fetching and persisting
//! rulesets by key, independent of the storage backend.
//!
//! # Features
//!
//! - **Versioning**: every `put` creates a new version (`"1"`, `"2"`, ...) per key
//! - **Memory Store**: concurrent in-process store for tests and embedding
//! - **File System Store**: one JSON document per version on disk
//! - **Caching**: TTL caching decorator over any store
//! - **Cancellation**: every call takes a [`Context`] carrying a cancel signal
//!   and an optional deadline
//!
//! # Quick Start
//!
//! ```no_run
//! use verdict_repository::{Context, MemoryStore, Store, WritableStore};
//! # use verdict_core::Ruleset;
//!
//! # async fn demo(ruleset: Ruleset) -> verdict_repository::RepositoryResult<()> {
//! let store = MemoryStore::new();
//! let ctx = Context::background();
//!
//! let entry = store.put(&ctx, "pricing/discount", ruleset).await?;
//! assert_eq!(entry.version, "1");
//!
//! let latest = store.get(&ctx, "pricing/discount").await?;
//! println!("{} returns {}", latest.key, latest.ruleset.result_type());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │        Application Layer               │
//! │  (SDK client, CLI)                     │
//! └──────────────┬─────────────────────────┘
//!                │ Store trait
//!                ↓
//! ┌────────────────────────────────────────┐
//! │    CachedStore (optional TTL layer)    │
//! └──────────────┬─────────────────────────┘
//!                │
//!       ┌────────┴────────┐
//!       ↓                 ↓
//! ┌──────────────┐  ┌──────────────────┐
//! │ MemoryStore  │  │ FileSystemStore  │
//! └──────────────┘  └──────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod traits;

// Re-exports - Configuration
pub use config::StoreConfig;

// Re-exports - Context
pub use context::{CancelHandle, Context};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Stores
pub use cache::CachedStore;
pub use file_system::FileSystemStore;
pub use memory::MemoryStore;
pub use models::*;
pub use traits::*;
