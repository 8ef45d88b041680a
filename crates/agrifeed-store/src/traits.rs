use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;

/// Asynchronous, persistent, string-keyed store.
///
/// All implementations must satisfy these invariants:
/// - `get` after a successful `set` of the same key returns that value until
///   the key is overwritten or removed.
/// - `remove` of an absent key succeeds.
/// - `list_keys` returns every key currently present, in no particular order.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite the value under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Every key currently in the store.
    async fn list_keys(&self) -> StoreResult<Vec<String>>;

    /// Keys ending in `suffix`, sorted.
    async fn keys_with_suffix(&self, suffix: &str) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .list_keys()
            .await?
            .into_iter()
            .filter(|k| k.ends_with(suffix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Shared handle passed to every component that touches the store.
pub type SharedStore = Arc<dyn KeyValueStore>;
