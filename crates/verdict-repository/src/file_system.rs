//! File system based store implementation
//!
//! Layout: each key is a directory under the root, and its versions are JSON
//! documents in a `.versions` directory inside it. Key segments may not start
//! with `.`, so no key can reach another key's versions.
//!
//! ```text
//! <root>/pricing/discount/.versions/1.json
//! <root>/pricing/discount/.versions/2.json
//! ```

use async_trait::async_trait;
use path_absolutize::Absolutize;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use verdict_core::Ruleset;

use crate::error::RepositoryError;
use crate::traits::check_signature;
use crate::{Context, RepositoryResult, RulesetEntry, Store, WritableStore};

const EXTENSION: &str = "json";
const VERSIONS_DIR: &str = ".versions";

/// File system based versioned store
pub struct FileSystemStore {
    /// Root path of the store
    root_path: PathBuf,
    /// Serializes puts so version numbers are assigned once
    write_lock: Mutex<()>,
}

impl FileSystemStore {
    /// Open a store rooted at an existing directory
    ///
    /// # Example
    /// ```no_run
    /// use verdict_repository::FileSystemStore;
    ///
    /// let store = FileSystemStore::new("rulesets").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        tracing::debug!(root = %abs_path.display(), "opened file system store");
        Ok(Self {
            root_path: abs_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Open a store, creating the root directory if needed
    pub fn create<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        std::fs::create_dir_all(root_path.as_ref())?;
        Self::new(root_path)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Map a key onto the directory holding its versions
    ///
    /// Each `/`-separated segment becomes one directory, so distinct keys
    /// never share a directory.
    fn versions_dir(&self, key: &str) -> RepositoryResult<PathBuf> {
        let invalid = |reason: &str| RepositoryError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(invalid("key is empty"));
        }
        if key.starts_with('/') || Path::new(key).is_absolute() {
            return Err(invalid("key must be relative"));
        }

        let mut dir = self.root_path.clone();
        for segment in key.split('/') {
            if segment.is_empty() {
                return Err(invalid("key contains an empty segment"));
            }
            if segment == ".." {
                return Err(invalid("key must not contain '..'"));
            }
            if segment.starts_with('.') {
                return Err(invalid("key segments must not start with '.'"));
            }
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => dir.push(segment),
                _ => return Err(invalid("key contains an unsupported path segment")),
            }
        }
        Ok(dir.join(VERSIONS_DIR))
    }

    fn version_path(dir: &Path, version: u64) -> PathBuf {
        dir.join(format!("{}.{}", version, EXTENSION))
    }

    /// Version numbers stored in `dir`, ascending
    async fn versions(dir: &Path) -> RepositoryResult<Vec<u64>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut versions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(version) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                versions.push(version);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    async fn read_version(&self, key: &str, dir: &Path, version: u64) -> RepositoryResult<RulesetEntry> {
        let path = Self::version_path(dir, version);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                return Err(RepositoryError::version_not_found(key, &version.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let ruleset = Ruleset::from_json(&content)?;
        tracing::debug!(key, version, path = %path.display(), "loaded ruleset from disk");
        Ok(RulesetEntry::new(key, version.to_string(), Arc::new(ruleset)))
    }

    async fn latest(&self, key: &str) -> RepositoryResult<Option<RulesetEntry>> {
        let dir = self.versions_dir(key)?;
        match Self::versions(&dir).await?.last() {
            Some(&version) => Ok(Some(self.read_version(key, &dir, version).await?)),
            None => Ok(None),
        }
    }

    /// Recursively collect keys (directories whose `.versions` holds at
    /// least one version)
    fn collect_keys<'a>(
        &'a self,
        dir: PathBuf,
        keys: &'a mut Vec<String>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RepositoryResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            let mut subdirs = Vec::new();
            while let Some(entry) = entries.next_entry().await? {
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if !hidden && entry.file_type().await?.is_dir() {
                    subdirs.push(entry.path());
                }
            }

            let has_version = dir != self.root_path
                && !Self::versions(&dir.join(VERSIONS_DIR)).await?.is_empty();
            if has_version {
                if let Ok(relative) = dir.strip_prefix(&self.root_path) {
                    let key: Vec<String> = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect();
                    keys.push(key.join("/"));
                }
            }

            for subdir in subdirs {
                self.collect_keys(subdir, keys).await?;
            }
            Ok(())
        })
    }
}

#[async_trait]
impl Store for FileSystemStore {
    async fn get(&self, ctx: &Context, key: &str) -> RepositoryResult<RulesetEntry> {
        ctx.run(async {
            self.latest(key)
                .await?
                .ok_or_else(|| RepositoryError::not_found(key))
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
            let dir = self.versions_dir(key)?;
            if Self::versions(&dir).await?.is_empty() {
                return Err(RepositoryError::not_found(key));
            }
            // Only the canonical form names a version: "01" is not "1"
            let number = version
                .parse::<u64>()
                .ok()
                .filter(|n| n.to_string() == version)
                .ok_or_else(|| RepositoryError::version_not_found(key, version))?;
            self.read_version(key, &dir, number).await
        })
        .await
    }
}

#[async_trait]
impl WritableStore for FileSystemStore {
    async fn put(
        &self,
        ctx: &Context,
        key: &str,
        ruleset: Ruleset,
    ) -> RepositoryResult<RulesetEntry> {
        ctx.run(async {
            let dir = self.versions_dir(key)?;
            let _guard = self.write_lock.lock().await;

            check_signature(self.latest(key).await?.as_ref(), &ruleset)?;

            let version = Self::versions(&dir).await?.last().map_or(1, |v| v + 1);
            let path = Self::version_path(&dir, version);
            let tmp_path = path.with_extension(format!("{}.tmp", EXTENSION));

            fs::create_dir_all(&dir).await?;
            fs::write(&tmp_path, ruleset.to_json_pretty()?).await?;
            fs::rename(&tmp_path, &path).await?;

            tracing::debug!(key, version, path = %path.display(), "stored ruleset on disk");
            Ok(RulesetEntry::new(key, version.to_string(), Arc::new(ruleset)))
        })
        .await
    }

    async fn list(&self, ctx: &Context, prefix: &str) -> RepositoryResult<Vec<String>> {
        ctx.run(async {
            let mut keys = Vec::new();
            self.collect_keys(self.root_path.clone(), &mut keys).await?;
            keys.retain(|key| key.starts_with(prefix));
            keys.sort();
            Ok(keys)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_validation() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(dir.path()).unwrap();

        assert_eq!(
            store.versions_dir("pricing/discount").unwrap(),
            store.root_path().join("pricing/discount/.versions")
        );
        for bad in [
            "", "/abs", "a/../b", "..", "./a", "a//b", "a/b/", "a/.versions", ".hidden",
        ] {
            let err = store.versions_dir(bad).unwrap_err();
            assert!(
                matches!(err, RepositoryError::InvalidKey { .. }),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = FileSystemStore::new(dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, RepositoryError::InvalidPath { .. }));
        assert!(FileSystemStore::create(dir.path().join("nope")).is_ok());
    }
}
