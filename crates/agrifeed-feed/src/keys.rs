//! Store key layout.
//!
//! ```text
//! posts                    JSON array of posts, newest first
//! posts_nextId             next counter id (counter id strategy only)
//! loggedIn                 "true" or absent
//! loggedInUser             active username
//! <username>_profileImage  that user's avatar URI
//! ```

pub const POSTS: &str = "posts";
pub const NEXT_POST_ID: &str = "posts_nextId";
pub const LOGGED_IN: &str = "loggedIn";
pub const LOGGED_IN_USER: &str = "loggedInUser";
pub const PROFILE_IMAGE_SUFFIX: &str = "_profileImage";

/// Value stored under [`LOGGED_IN`] while a session is active.
pub const LOGGED_IN_TRUE: &str = "true";

/// Key holding `username`'s avatar.
pub fn profile_image_key(username: &str) -> String {
    format!("{username}{PROFILE_IMAGE_SUFFIX}")
}

/// Username encoded in an avatar key, or `None` if `key` is not one.
///
/// Only the suffix is stripped, so usernames may themselves contain `_`.
pub fn username_from_profile_key(key: &str) -> Option<&str> {
    key.strip_suffix(PROFILE_IMAGE_SUFFIX)
        .filter(|name| !name.is_empty())
}
