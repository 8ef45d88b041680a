use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a post, unique within one collection.
///
/// Serialized as a bare string. Depending on the generator in use this is a
/// decimal sequence number (`"3"`), a UUID v7, or a fixed seed tag.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Wrap an existing identifier. Rejects the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyPostId);
        }
        Ok(Self(id))
    }

    /// Decimal identifier for the `n`th post (`"1"`, `"2"`, ...).
    pub fn from_sequence(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Generate a new time-ordered identifier (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({})", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an image bundled with the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u32);

/// Image attached to a post.
///
/// The two representations are mutually exclusive: a picked image is a URI
/// string, a bundled image is a numeric asset identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Uri(String),
    Bundled(AssetId),
}

impl ImageRef {
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            Self::Bundled(_) => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => f.write_str(uri),
            Self::Bundled(AssetId(id)) => write!(f, "asset:{id}"),
        }
    }
}

/// One feed entry.
///
/// `like_count` is signed: un-liking is a plain decrement, so a counter that
/// was reset underneath a liked flag can go below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "userName")]
    pub author_name: String,
    #[serde(
        rename = "userProfileImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author_image: Option<String>,
    #[serde(rename = "postContent")]
    pub content: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(rename = "likes")]
    pub like_count: i64,
    #[serde(rename = "comments")]
    pub comment_count: u64,
    #[serde(rename = "source", default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

impl Post {
    /// A fresh post with zero likes and zero comments.
    pub fn new(id: PostId, author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            author_name: author_name.into(),
            author_image: None,
            content: content.into(),
            image: None,
            like_count: 0,
            comment_count: 0,
            source_label: None,
        }
    }

    pub fn with_author_image(mut self, uri: impl Into<String>) -> Self {
        self.author_image = Some(uri.into());
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_likes(mut self, likes: i64) -> Self {
        self.like_count = likes;
        self
    }

    pub fn with_comments(mut self, comments: u64) -> Self {
        self.comment_count = comments;
        self
    }

    pub fn with_source(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }
}

/// Decode a serialized post collection (a JSON array, newest first).
pub fn decode_collection(raw: &str) -> Result<Vec<Post>, TypeError> {
    serde_json::from_str(raw).map_err(|e| TypeError::Serialization(e.to_string()))
}

/// Encode a post collection for storage under a single key.
pub fn encode_collection(posts: &[Post]) -> Result<String, TypeError> {
    serde_json::to_string(posts).map_err(|e| TypeError::Serialization(e.to_string()))
}
