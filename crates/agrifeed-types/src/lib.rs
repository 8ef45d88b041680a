//! Foundation types for AgriFeed.
//!
//! This crate provides the data model shared by every other AgriFeed crate:
//! the [`Post`] feed entry, its [`PostId`], the [`ImageRef`] attached to a
//! post, and the viewer [`Session`].
//!
//! # Key Types
//!
//! - [`Post`]: One feed entry with like/comment counters
//! - [`PostId`]: Opaque string identifier, unique within a collection
//! - [`ImageRef`]: Picked image URI or bundled static asset
//! - [`Session`]: Whether a viewer is logged in, and as whom
//!
//! The serialized form of [`Post`] uses the camelCase field names of the
//! on-device layout (`userName`, `postContent`, `likes`, ...), so collections
//! written by earlier builds of the app decode unchanged.

pub mod error;
pub mod post;
pub mod session;

pub use error::TypeError;
pub use post::{decode_collection, encode_collection, AssetId, ImageRef, Post, PostId};
pub use session::Session;
