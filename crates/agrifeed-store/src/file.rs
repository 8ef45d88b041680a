//! JSON-file backed key-value store.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) held in
//! memory and rewritten on every mutation. Each rewrite goes to a sibling
//! `.tmp` file which is then renamed over the original, so a crash leaves
//! either the old or the new contents on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// Persistent store backed by a single JSON file.
pub struct FileKvStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing or zero-length file opens as an empty store. A file that is
    /// not a JSON object of strings is rejected with [`StoreError::Corrupt`].
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = raw.len(), "store flushed");
        Ok(())
    }

    /// Apply `mutate` to a copy of the map and commit it only once the copy
    /// is on disk.
    async fn mutate<F>(&self, mutate: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool + Send,
    {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        if !mutate(&mut next) {
            return Ok(());
        }
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.mutate(move |map| {
            map.insert(key, value);
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.mutate(|map| map.remove(key).is_some()).await
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

impl std::fmt::Debug for FileKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKvStore")
            .field("path", &self.path)
            .finish()
    }
}
