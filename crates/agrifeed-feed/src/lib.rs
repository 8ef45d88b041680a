//! Local post store, like toggling and viewer session for AgriFeed.
//!
//! Everything here runs against a [`KeyValueStore`](agrifeed_store::KeyValueStore)
//! handed in by the caller; there is no global store and no network.
//!
//! # Components
//!
//! - [`PostRepository`]: the whole post collection under one key
//! - [`LikeState`] / [`likes::toggle`]: per-session liked flags
//! - [`SessionState`]: login flag, username and avatar, plus logout
//! - [`ProfileImageIndex`]: username -> avatar, from a key scan
//! - [`IdGenerator`]: identifiers for new posts
//! - [`FeedView`]: one feed or composer view wiring the above together
//!   behind an `activate`/`deactivate` lifecycle
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use agrifeed_feed::{FeedConfig, FeedView};
//! use agrifeed_store::{InMemoryKvStore, KeyValueStore};
//!
//! # tokio_test_block_on(async {
//! let store = Arc::new(InMemoryKvStore::new());
//! store.set("loggedIn", "true").await.unwrap();
//! store.set("loggedInUser", "amina").await.unwrap();
//!
//! let mut composer = FeedView::composer(store.clone(), FeedConfig::default());
//! composer.activate().await;
//! let id = composer.submit("Maize is tasselling", None).await.unwrap().id.clone();
//!
//! let mut feed = FeedView::feed(store, FeedConfig::default());
//! feed.activate().await;
//! assert_eq!(feed.toggle_like(&id).await.unwrap().like_count, 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod avatars;
pub mod config;
pub mod error;
pub mod ids;
pub mod keys;
pub mod likes;
pub mod repository;
pub mod seed;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use avatars::ProfileImageIndex;
pub use config::{FeedConfig, IdStrategy, PLACEHOLDER_IMAGE};
pub use error::{ComposeError, FeedError, FeedResult};
pub use ids::IdGenerator;
pub use likes::{LikePersistence, LikeState, LikedMap, ToggleOutcome};
pub use repository::PostRepository;
pub use session::{Navigation, SessionState};
pub use view::{FeedEntry, FeedView, ViewKind};
