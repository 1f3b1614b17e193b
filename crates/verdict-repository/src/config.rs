//! Store configuration types
//!
//! Selects the backend a client or tool talks to.
//!
//! ```rust
//! use verdict_repository::StoreConfig;
//!
//! let config: StoreConfig = serde_json::from_str(r#"{"kind":"filesystem","path":"rulesets"}"#).unwrap();
//! assert_eq!(config, StoreConfig::file_system("rulesets"));
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{FileSystemStore, MemoryStore, RepositoryResult, WritableStore};

/// Store backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local store, empty at start
    #[default]
    Memory,
    /// Versioned JSON documents under `path`
    Filesystem { path: PathBuf },
}

impl StoreConfig {
    pub fn memory() -> Self {
        StoreConfig::Memory
    }

    pub fn file_system(path: impl Into<PathBuf>) -> Self {
        StoreConfig::Filesystem { path: path.into() }
    }

    /// Instantiate the configured backend. File system roots are created
    /// when missing.
    pub fn open(&self) -> RepositoryResult<Arc<dyn WritableStore>> {
        match self {
            StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreConfig::Filesystem { path } => Ok(Arc::new(FileSystemStore::create(path)?)),
        }
    }
}
