use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// In-memory, HashMap-based key-value store.
///
/// Intended for tests and embedding. Values are cloned on read and write;
/// data is lost when the store is dropped.
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key.
    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Unavailable(format!("lock poisoned: {e}"))
}

#[async_trait]
impl KeyValueStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self.entries.write().map_err(poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut map = self.entries.write().map_err(poisoned)?;
        map.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map.keys().cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKvStore")
            .field("key_count", &self.len())
            .finish()
    }
}
