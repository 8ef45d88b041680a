//! Username to avatar index.
//!
//! Avatars are stored one key per user (`<username>_profileImage`). The index
//! is rebuilt from a full key scan on every activation; it is never stored.

use std::collections::HashMap;

use agrifeed_store::SharedStore;
use tracing::{debug, warn};

use crate::keys;

/// Builds the username -> avatar URI mapping.
#[derive(Clone)]
pub struct ProfileImageIndex {
    store: SharedStore,
    placeholder: String,
}

impl ProfileImageIndex {
    pub fn new(store: SharedStore, placeholder: impl Into<String>) -> Self {
        Self {
            store,
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Scan every key and resolve each avatar key. Empty, missing or
    /// unreadable values map to the placeholder; if the key scan itself
    /// fails the index is empty.
    pub async fn build(&self) -> HashMap<String, String> {
        let all_keys = match self.store.list_keys().await {
            Ok(k) => k,
            Err(e) => {
                warn!(error = %e, "failed to list store keys; avatar index is empty");
                return HashMap::new();
            }
        };

        let mut index = HashMap::new();
        for key in &all_keys {
            let Some(username) = keys::username_from_profile_key(key) else {
                continue;
            };
            let uri = match self.store.get(key).await {
                Ok(Some(uri)) if !uri.is_empty() => uri,
                Ok(_) => self.placeholder.clone(),
                Err(e) => {
                    warn!(key = %key, error = %e, "failed to read avatar; using placeholder");
                    self.placeholder.clone()
                }
            };
            index.insert(username.to_string(), uri);
        }
        debug!(scanned = all_keys.len(), avatars = index.len(), "built avatar index");
        index
    }
}

impl std::fmt::Debug for ProfileImageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileImageIndex")
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_IMAGE;
    use crate::test_support::FlakyStore;
    use agrifeed_store::{InMemoryKvStore, KeyValueStore};
    use std::sync::Arc;

    fn index_over(store: Arc<InMemoryKvStore>) -> ProfileImageIndex {
        ProfileImageIndex::new(store, PLACEHOLDER_IMAGE)
    }

    #[tokio::test]
    async fn empty_values_get_placeholder() {
        let store = Arc::new(InMemoryKvStore::with_entries([
            ("alice_profileImage", "u1"),
            ("bob_profileImage", ""),
        ]));
        let index = index_over(store).build().await;
        let expected: HashMap<String, String> = [
            ("alice".to_string(), "u1".to_string()),
            ("bob".to_string(), PLACEHOLDER_IMAGE.to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(index, expected);
    }

    #[tokio::test]
    async fn other_keys_are_skipped() {
        let store = Arc::new(InMemoryKvStore::with_entries([
            (keys::POSTS, "[]"),
            (keys::LOGGED_IN, "true"),
            (keys::LOGGED_IN_USER, "alice"),
            ("alice_profileImage", "u1"),
        ]));
        let index = index_over(store).build().await;
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("alice").map(String::as_str), Some("u1"));
    }

    #[tokio::test]
    async fn usernames_with_underscores() {
        let store = Arc::new(InMemoryKvStore::with_entries([("mary_jane_profileImage", "mj")]));
        let index = index_over(store).build().await;
        assert_eq!(index.get("mary_jane").map(String::as_str), Some("mj"));
        assert!(!index.contains_key("mary"));
    }

    #[tokio::test]
    async fn empty_store_gives_empty_index() {
        let index = index_over(Arc::new(InMemoryKvStore::new())).build().await;
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn scan_failure_gives_empty_index() {
        let store = Arc::new(FlakyStore::new());
        store.inner.set("alice_profileImage", "u1").await.unwrap();
        store.fail_reads(true);
        let index = ProfileImageIndex::new(store, "p").build().await;
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn custom_placeholder() {
        let store = Arc::new(InMemoryKvStore::with_entries([("bob_profileImage", "")]));
        let index = ProfileImageIndex::new(store, "asset://avatar.png");
        assert_eq!(index.placeholder(), "asset://avatar.png");
        let built = index.build().await;
        assert_eq!(built.get("bob").map(String::as_str), Some("asset://avatar.png"));
    }
}
