//! Built-in posts shown beneath the stored ones.
//!
//! Seed posts are never written to the store and cannot be liked.

use agrifeed_types::{AssetId, ImageRef, Post, PostId};

use crate::view::ViewKind;

pub const IRRIGATION_ASSET: AssetId = AssetId(1);
pub const COFFEE_ASSET: AssetId = AssetId(2);

fn seed_id(tag: &'static str) -> PostId {
    PostId::new(tag).expect("seed ids are non-empty")
}

/// Seed posts for a view. The composer variant carries explicit avatars.
pub fn seed_posts(kind: ViewKind, placeholder: &str) -> Vec<Post> {
    let irrigation = Post::new(
        seed_id("dummy1"),
        "Twesige Trejan",
        "New techniques in irrigation are changing the game.",
    )
    .with_image(ImageRef::Bundled(IRRIGATION_ASSET))
    .with_likes(3)
    .with_source("Agri Journal");

    match kind {
        ViewKind::Feed => vec![
            irrigation,
            Post::new(
                seed_id("dummy2"),
                "Haven Ella",
                "Just harvested my first crop of the season!.",
            )
            .with_image(ImageRef::Bundled(COFFEE_ASSET))
            .with_likes(10)
            .with_source("Personal Farm"),
        ],
        ViewKind::Composer => vec![
            irrigation.with_author_image(placeholder),
            Post::new(
                seed_id("dummy2"),
                "Haven Ella",
                "This season\u{2019}s best practices for sustainable farming.",
            )
            .with_author_image(placeholder)
            .with_image(ImageRef::Bundled(COFFEE_ASSET))
            .with_likes(7)
            .with_comments(2)
            .with_source("Farmers Weekly"),
        ],
    }
}
