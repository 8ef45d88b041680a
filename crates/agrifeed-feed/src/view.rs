//! Feed and composer views.
//!
//! A [`FeedView`] owns the screen-local state of one view: the loaded
//! collection, the viewer's liked flags, the avatar index and the session.
//! All of it is derived from the store and rebuilt by [`FeedView::activate`];
//! nothing is merged across activations.
//!
//! The two kinds differ only in seed content and in whether likes are saved
//! ([`LikePersistence`]).

use std::collections::HashMap;
use std::mem;

use agrifeed_store::SharedStore;
use agrifeed_types::{ImageRef, Post, PostId, Session};
use tracing::{debug, info, warn};

use crate::avatars::ProfileImageIndex;
use crate::config::FeedConfig;
use crate::error::ComposeError;
use crate::ids::IdGenerator;
use crate::likes::{LikePersistence, LikeState, ToggleOutcome};
use crate::repository::PostRepository;
use crate::seed::seed_posts;
use crate::session::{Navigation, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Read-only feed; likes last until the next reload.
    Feed,
    /// Composer with its own feed; likes are saved (unless configured off).
    Composer,
}

/// One row of the rendered feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedEntry<'a> {
    pub post: &'a Post,
    pub seed: bool,
    pub liked: bool,
    pub author_image: &'a str,
}

/// Screen-local state of a feed or composer view.
pub struct FeedView {
    kind: ViewKind,
    config: FeedConfig,
    repository: PostRepository,
    ids: IdGenerator,
    sessions: SessionState,
    avatars: ProfileImageIndex,
    likes: LikeState,
    posts: Vec<Post>,
    seeds: Vec<Post>,
    profile_images: HashMap<String, String>,
    session: Session,
    generation: u64,
    active: bool,
}

impl FeedView {
    pub fn new(kind: ViewKind, store: SharedStore, config: FeedConfig) -> Self {
        let persistence = match kind {
            ViewKind::Composer if config.composer_persists_likes => LikePersistence::Durable,
            _ => LikePersistence::Ephemeral,
        };
        let seeds = if config.show_seed_posts {
            seed_posts(kind, &config.placeholder_image)
        } else {
            Vec::new()
        };
        Self {
            kind,
            repository: PostRepository::new(store.clone()),
            ids: IdGenerator::new(config.id_strategy, store.clone()),
            sessions: SessionState::new(store.clone()),
            avatars: ProfileImageIndex::new(store, config.placeholder_image.clone()),
            likes: LikeState::new(persistence),
            posts: Vec::new(),
            seeds,
            profile_images: HashMap::new(),
            session: Session::anonymous(),
            generation: 0,
            active: false,
            config,
        }
    }

    pub fn feed(store: SharedStore, config: FeedConfig) -> Self {
        Self::new(ViewKind::Feed, store, config)
    }

    pub fn composer(store: SharedStore, config: FeedConfig) -> Self {
        Self::new(ViewKind::Composer, store, config)
    }

    // ---- Lifecycle ----

    /// Rebuild every piece of view state from the store.
    ///
    /// Liked flags are cleared, so a fresh activation never shows a post as
    /// liked even when its counter includes earlier likes. Returns the new
    /// activation generation.
    pub async fn activate(&mut self) -> u64 {
        self.generation += 1;
        self.likes.reset();
        self.posts = self.repository.load().await;
        self.profile_images = self.avatars.build().await;
        self.session = self.sessions.check_status().await;
        self.active = true;
        info!(
            kind = ?self.kind,
            generation = self.generation,
            posts = self.posts.len(),
            user = self.session.username().unwrap_or("<anonymous>"),
            "view activated"
        );
        self.generation
    }

    /// Drop all screen-local state.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.likes.reset();
        self.posts.clear();
        self.profile_images.clear();
        self.session = Session::anonymous();
        debug!(kind = ?self.kind, generation = self.generation, "view deactivated");
    }

    /// Re-read the collection only, as on regaining focus. Liked flags and
    /// the avatar index are kept.
    pub async fn refresh(&mut self) {
        if !self.active {
            return;
        }
        self.posts = self.repository.load().await;
    }

    // ---- Actions ----

    /// Toggle the viewer's like on `post_id`. Saves the collection when the
    /// view's likes are durable. `None` if the post is not in the stored
    /// collection (seed posts included).
    pub async fn toggle_like(&mut self, post_id: &PostId) -> Option<ToggleOutcome> {
        let outcome = self.likes.toggle(post_id, &mut self.posts)?;
        if self.likes.persists() {
            self.repository.replace(&self.posts).await;
        }
        debug!(id = %post_id, liked = outcome.liked, likes = outcome.like_count, "like toggled");
        Some(outcome)
    }

    /// Compose a post as the session user and prepend it to the collection.
    pub async fn submit(
        &mut self,
        content: &str,
        image: Option<ImageRef>,
    ) -> Result<&Post, ComposeError> {
        if !self.active {
            return Err(ComposeError::Inactive);
        }
        if !self.session.is_active {
            return Err(ComposeError::NotLoggedIn);
        }
        if content.trim().is_empty() {
            return Err(ComposeError::EmptyContent);
        }
        let Some(author) = self.session.username().map(str::to_string) else {
            return Err(ComposeError::MissingUsername);
        };

        let id = match self.ids.next_id(&self.posts).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, strategy = ?self.ids.strategy(), "id generation failed; using a random id");
                PostId::generate()
            }
        };
        let author_image = self
            .session
            .profile_image
            .clone()
            .unwrap_or_else(|| self.config.placeholder_image.clone());

        let mut post = Post::new(id, author, content).with_author_image(author_image);
        post.image = image;
        info!(id = %post.id, author = %post.author_name, "post submitted");

        let existing = mem::take(&mut self.posts);
        self.posts = self.repository.append(post, existing).await;
        Ok(&self.posts[0])
    }

    /// The login/logout button.
    pub async fn toggle_session(&mut self) -> Navigation {
        let nav = self.sessions.toggle(&self.session).await;
        self.session = Session::anonymous();
        nav
    }

    // ---- Accessors ----

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn like_persistence(&self) -> LikePersistence {
        self.likes.persistence()
    }

    /// The stored collection as last loaded or modified, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == post_id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profile_images(&self) -> &HashMap<String, String> {
        &self.profile_images
    }

    pub fn is_liked(&self, post_id: &PostId) -> bool {
        self.likes.is_liked(post_id)
    }

    /// Avatar for a post's author, falling back to the placeholder.
    ///
    /// The feed prefers the author's current avatar from the index over the
    /// one captured on the post. The composer shows what the post captured.
    pub fn author_image<'a>(&'a self, post: &'a Post) -> &'a str {
        let indexed = self.profile_images.get(&post.author_name).map(String::as_str);
        let captured = post.author_image.as_deref();
        let resolved = match self.kind {
            ViewKind::Feed => indexed.or(captured),
            ViewKind::Composer => captured.or(indexed),
        };
        resolved.unwrap_or(self.config.placeholder_image.as_str())
    }

    /// Stored posts followed by the seed posts.
    pub fn entries(&self) -> Vec<FeedEntry<'_>> {
        let stored = self.posts.iter().map(|p| (p, false));
        let seeds = self.seeds.iter().map(|p| (p, true));
        stored
            .chain(seeds)
            .map(|(post, seed)| FeedEntry {
                post,
                seed,
                liked: !seed && self.likes.is_liked(&post.id),
                author_image: self.author_image(post),
            })
            .collect()
    }
}

impl std::fmt::Debug for FeedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedView")
            .field("kind", &self.kind)
            .field("active", &self.active)
            .field("generation", &self.generation)
            .field("posts", &self.posts.len())
            .finish_non_exhaustive()
    }
}
