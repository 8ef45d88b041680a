//! Post identifier assignment.

use agrifeed_store::SharedStore;
use agrifeed_types::{Post, PostId};
use tracing::debug;

use crate::config::IdStrategy;
use crate::error::{FeedError, FeedResult};
use crate::keys;

/// Assigns identifiers to newly composed posts.
#[derive(Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    store: SharedStore,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy, store: SharedStore) -> Self {
        Self { strategy, store }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Identifier for a post about to be prepended to `existing`.
    ///
    /// Only [`IdStrategy::Counter`] touches the store; it fails if the stored
    /// counter cannot be read, parsed, or advanced.
    pub async fn next_id(&self, existing: &[Post]) -> FeedResult<PostId> {
        match self.strategy {
            IdStrategy::Sequential => Ok(PostId::from_sequence(existing.len() as u64 + 1)),
            IdStrategy::Uuid => Ok(PostId::generate()),
            IdStrategy::Counter => self.next_counter_id(existing).await,
        }
    }

    async fn next_counter_id(&self, existing: &[Post]) -> FeedResult<PostId> {
        let next = match self.store.get(keys::NEXT_POST_ID).await? {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| FeedError::CorruptCounter(raw.clone()))?,
            // First use: start past every numeric id already in the collection
            // so legacy sequential ids are never reissued.
            None => {
                let highest = highest_numeric_id(existing).max(existing.len() as u64);
                highest
                    .checked_add(1)
                    .ok_or_else(|| FeedError::CorruptCounter(highest.to_string()))?
            }
        };
        let after = next
            .checked_add(1)
            .ok_or_else(|| FeedError::CorruptCounter(next.to_string()))?;
        self.store
            .set(keys::NEXT_POST_ID, &after.to_string())
            .await?;
        debug!(id = next, "issued counter id");
        Ok(PostId::from_sequence(next))
    }
}

fn highest_numeric_id(posts: &[Post]) -> u64 {
    posts
        .iter()
        .filter_map(|p| p.id.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrifeed_store::{InMemoryKvStore, KeyValueStore};
    use std::sync::Arc;

    fn post(id: &str) -> Post {
        Post::new(PostId::new(id).unwrap(), "a", "b")
    }

    fn generator(strategy: IdStrategy) -> (Arc<InMemoryKvStore>, IdGenerator) {
        let store = Arc::new(InMemoryKvStore::new());
        let ids = IdGenerator::new(strategy, store.clone());
        (store, ids)
    }

    #[tokio::test]
    async fn sequential_counts_existing_posts() {
        let (_, ids) = generator(IdStrategy::Sequential);
        assert_eq!(ids.next_id(&[]).await.unwrap().as_str(), "1");
        let existing = vec![post("2"), post("1")];
        assert_eq!(ids.next_id(&existing).await.unwrap().as_str(), "3");
    }

    #[tokio::test]
    async fn sequential_collides_after_a_gap() {
        // Two posts where one was removed: the scheme reissues "2".
        let (_, ids) = generator(IdStrategy::Sequential);
        let existing = vec![post("2")];
        assert_eq!(ids.next_id(&existing).await.unwrap(), existing[0].id);
    }

    #[tokio::test]
    async fn uuid_ids_never_repeat() {
        let (store, ids) = generator(IdStrategy::Uuid);
        let a = ids.next_id(&[]).await.unwrap();
        let b = ids.next_id(&[]).await.unwrap();
        assert_ne!(a, b);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn counter_is_monotonic_and_persisted() {
        let (store, ids) = generator(IdStrategy::Counter);
        assert_eq!(ids.next_id(&[]).await.unwrap().as_str(), "1");
        assert_eq!(ids.next_id(&[]).await.unwrap().as_str(), "2");
        assert_eq!(
            store.get(keys::NEXT_POST_ID).await.unwrap().as_deref(),
            Some("3")
        );

        // A second generator over the same store continues the sequence.
        let again = IdGenerator::new(IdStrategy::Counter, store.clone());
        assert_eq!(again.next_id(&[]).await.unwrap().as_str(), "3");
    }

    #[tokio::test]
    async fn counter_starts_past_legacy_ids() {
        let (_, ids) = generator(IdStrategy::Counter);
        let existing = vec![post("7"), post("dummy1")];
        assert_eq!(ids.next_id(&existing).await.unwrap().as_str(), "8");
    }

    #[tokio::test]
    async fn corrupt_counter_is_an_error() {
        let (store, ids) = generator(IdStrategy::Counter);
        store.set(keys::NEXT_POST_ID, "seven").await.unwrap();
        let err = ids.next_id(&[]).await.unwrap_err();
        assert!(matches!(err, FeedError::CorruptCounter(raw) if raw == "seven"));
    }

    #[tokio::test]
    async fn exhausted_legacy_ids_are_an_error() {
        let (store, ids) = generator(IdStrategy::Counter);
        let existing = vec![post(&u64::MAX.to_string())];
        let err = ids.next_id(&existing).await.unwrap_err();
        assert!(matches!(err, FeedError::CorruptCounter(_)));
        assert!(store.get(keys::NEXT_POST_ID).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exhausted_counter_is_an_error() {
        let (store, ids) = generator(IdStrategy::Counter);
        let max = u64::MAX.to_string();
        store.set(keys::NEXT_POST_ID, &max).await.unwrap();
        let err = ids.next_id(&[]).await.unwrap_err();
        assert!(matches!(err, FeedError::CorruptCounter(raw) if raw == max));
        assert_eq!(store.get(keys::NEXT_POST_ID).await.unwrap(), Some(max));
    }
}
