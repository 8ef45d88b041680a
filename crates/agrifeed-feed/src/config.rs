use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// Avatar shown when a user has no stored profile image.
pub const PLACEHOLDER_IMAGE: &str = "https://upload.wikimedia.org/wikipedia/commons/7/7c/Profile_avatar_placeholder_large.png?20150327203541";

/// How new post identifiers are assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `count(existing) + 1` as a decimal string.
    ///
    /// Collides after a deletion or when two composers append from the same
    /// snapshot. Kept for compatibility with collections written by earlier
    /// builds.
    Sequential,
    /// Time-ordered UUID v7 tokens.
    #[default]
    Uuid,
    /// Monotonic counter persisted next to the collection.
    Counter,
}

/// Configuration for feed and composer views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub id_strategy: IdStrategy,
    /// Append the built-in seed posts after the stored ones.
    pub show_seed_posts: bool,
    pub placeholder_image: String,
    /// Whether likes toggled in the composer view are written back to the
    /// store. Feed-view likes are never persisted.
    pub composer_persists_likes: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            show_seed_posts: true,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            composer_persists_likes: true,
        }
    }
}

impl FeedConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> FeedResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| FeedError::Config(e.to_string()))?;
        if config.placeholder_image.trim().is_empty() {
            return Err(FeedError::Config("placeholder_image must not be empty".into()));
        }
        Ok(config)
    }

    /// Configuration that reproduces the behaviour of the original app,
    /// including its counting-based identifiers.
    pub fn legacy() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = FeedConfig::default();
        assert_eq!(c.id_strategy, IdStrategy::Uuid);
        assert!(c.show_seed_posts);
        assert!(c.composer_persists_likes);
        assert_eq!(c.placeholder_image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn legacy_uses_sequential_ids() {
        assert_eq!(FeedConfig::legacy().id_strategy, IdStrategy::Sequential);
    }

    #[test]
    fn parses_partial_toml() {
        let c = FeedConfig::from_toml_str("id_strategy = \"counter\"\nshow_seed_posts = false\n")
            .unwrap();
        assert_eq!(c.id_strategy, IdStrategy::Counter);
        assert!(!c.show_seed_posts);
        assert!(c.composer_persists_likes);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(FeedConfig::from_toml_str("").unwrap(), FeedConfig::default());
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = FeedConfig::from_toml_str("id_strategy = \"random\"").unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn rejects_blank_placeholder() {
        let err = FeedConfig::from_toml_str("placeholder_image = \"  \"").unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }
}
