//! Verdict client SDK
//!
//! High-level API for fetching rulesets by key and evaluating them.
//!
//! ```rust,no_run
//! use verdict_core::params;
//! use verdict_repository::Context;
//! use verdict_sdk::{ClientBuilder, ClientConfig};
//!
//! # async fn demo() -> verdict_sdk::Result<()> {
//! let client = ClientBuilder::new()
//!     .with_config(ClientConfig::load()?)
//!     .build()?;
//!
//! let discount = client
//!     .get_int64(&Context::background(), "pricing/discount", &params! { "product-id" => "b" })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;

// Re-export main types
pub use builder::ClientBuilder;
pub use client::{Client, EvalOptions, EvalResult};
pub use config::{CacheSettings, ClientConfig};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use verdict_core::{ErrorKind, Params, Ruleset, Value, ValueType};
pub use verdict_repository::{Context, StoreConfig};
