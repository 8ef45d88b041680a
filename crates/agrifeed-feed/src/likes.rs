//! Optimistic like toggling.
//!
//! Which posts the current viewer has liked is session state: it starts empty
//! on every activation and is never written to the store. The like counter
//! on each post, by contrast, is part of the collection and may or may not be
//! persisted depending on the view (see [`LikePersistence`]).

use std::collections::HashMap;

use agrifeed_types::{Post, PostId};
use tracing::warn;

/// Per-session "liked by the current viewer" flags. Absent means not liked.
pub type LikedMap = HashMap<PostId, bool>;

/// Whether a toggled like counter is written back to the store.
///
/// The feed and composer views have always disagreed on this: a like in the
/// feed lasts only until the next reload, a like in the composer is saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikePersistence {
    Ephemeral,
    Durable,
}

/// Result of toggling one post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub post_id: PostId,
    pub liked: bool,
    pub like_count: i64,
}

/// Toggle the viewer's like on `post_id`.
///
/// Not liked: the counter goes up by one and the flag is set. Liked: the
/// counter goes down by one and the flag is cleared. The decrement has no
/// floor. If no post has `post_id`, or its counter is already at the limit
/// of `i64`, both inputs come back unchanged.
pub fn toggle(post_id: &PostId, posts: &[Post], liked: &LikedMap) -> (Vec<Post>, LikedMap) {
    let mut posts = posts.to_vec();
    let mut liked = liked.clone();
    apply(post_id, &mut posts, &mut liked);
    (posts, liked)
}

fn apply(post_id: &PostId, posts: &mut [Post], liked: &mut LikedMap) -> Option<ToggleOutcome> {
    let was_liked = is_liked(liked, post_id);
    let delta: i64 = if was_liked { -1 } else { 1 };
    let mut matching = posts.iter().filter(|p| &p.id == post_id).peekable();
    matching.peek()?;
    if matching.any(|p| p.like_count.checked_add(delta).is_none()) {
        warn!(id = %post_id, "like counter at its limit; toggle ignored");
        return None;
    }

    let mut like_count = 0;
    for post in posts.iter_mut().filter(|p| &p.id == post_id) {
        post.like_count += delta;
        like_count = post.like_count;
    }

    if was_liked {
        liked.remove(post_id);
    } else {
        liked.insert(post_id.clone(), true);
    }
    Some(ToggleOutcome {
        post_id: post_id.clone(),
        liked: !was_liked,
        like_count,
    })
}

fn is_liked(liked: &LikedMap, post_id: &PostId) -> bool {
    liked.get(post_id).copied().unwrap_or(false)
}

/// The viewer's liked flags together with the view's persistence policy.
#[derive(Clone, Debug)]
pub struct LikeState {
    liked: LikedMap,
    persistence: LikePersistence,
}

impl LikeState {
    pub fn new(persistence: LikePersistence) -> Self {
        Self {
            liked: LikedMap::new(),
            persistence,
        }
    }

    pub fn persistence(&self) -> LikePersistence {
        self.persistence
    }

    /// Whether toggles should be followed by a write of the collection.
    pub fn persists(&self) -> bool {
        self.persistence == LikePersistence::Durable
    }

    pub fn is_liked(&self, post_id: &PostId) -> bool {
        is_liked(&self.liked, post_id)
    }

    pub fn liked(&self) -> &LikedMap {
        &self.liked
    }

    /// Toggle `post_id` within `posts` in place.
    ///
    /// Returns `None`, touching nothing, when `post_id` is not in `posts` or
    /// its counter cannot move any further.
    pub fn toggle(&mut self, post_id: &PostId, posts: &mut [Post]) -> Option<ToggleOutcome> {
        apply(post_id, posts, &mut self.liked)
    }

    /// Forget every flag. Called on activation.
    pub fn reset(&mut self) {
        self.liked.clear();
    }
}
