//! The canonical post collection.
//!
//! All posts live under one key ([`keys::POSTS`]) as a single JSON array,
//! newest first. Every mutation is a whole-collection read-modify-write: two
//! writers working from the same snapshot race, and the last one wins.

use agrifeed_store::SharedStore;
use agrifeed_types::{decode_collection, encode_collection, Post};
use tracing::{debug, warn};

use crate::error::FeedResult;
use crate::keys;

/// Loads and persists the post collection.
#[derive(Clone)]
pub struct PostRepository {
    store: SharedStore,
}

impl PostRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Read the stored collection, propagating read and parse failures.
    pub async fn try_load(&self) -> FeedResult<Vec<Post>> {
        match self.store.get(keys::POSTS).await? {
            Some(raw) => Ok(decode_collection(&raw)?),
            None => {
                debug!("no posts stored");
                Ok(Vec::new())
            }
        }
    }

    /// Read the stored collection. A missing, unreadable or malformed value
    /// yields an empty collection.
    pub async fn load(&self) -> Vec<Post> {
        match self.try_load().await {
            Ok(posts) => {
                debug!(count = posts.len(), "loaded posts");
                posts
            }
            Err(e) => {
                warn!(error = %e, "failed to load posts; starting from an empty feed");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection with `posts`.
    pub async fn try_replace(&self, posts: &[Post]) -> FeedResult<()> {
        let raw = encode_collection(posts)?;
        self.store.set(keys::POSTS, &raw).await?;
        debug!(count = posts.len(), "saved posts");
        Ok(())
    }

    /// Overwrite the stored collection. A failed write is logged and
    /// otherwise ignored: the caller's copy stays authoritative until the
    /// next successful write.
    pub async fn replace(&self, posts: &[Post]) {
        if let Err(e) = self.try_replace(posts).await {
            warn!(error = %e, count = posts.len(), "failed to save posts");
        }
    }

    /// Prepend `new_post` to `existing` and persist the result.
    pub async fn try_append(&self, new_post: Post, existing: Vec<Post>) -> FeedResult<Vec<Post>> {
        let posts = prepend(new_post, existing);
        self.try_replace(&posts).await?;
        Ok(posts)
    }

    /// Prepend `new_post` to `existing`, persist, and return the new
    /// collection whether or not the write succeeded.
    pub async fn append(&self, new_post: Post, existing: Vec<Post>) -> Vec<Post> {
        let posts = prepend(new_post, existing);
        self.replace(&posts).await;
        posts
    }
}

fn prepend(new_post: Post, existing: Vec<Post>) -> Vec<Post> {
    let mut posts = Vec::with_capacity(existing.len() + 1);
    posts.push(new_post);
    posts.extend(existing);
    posts
}

impl std::fmt::Debug for PostRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRepository").finish_non_exhaustive()
    }
}
