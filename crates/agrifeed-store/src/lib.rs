//! Asynchronous key-value storage for AgriFeed.
//!
//! All durable state in AgriFeed lives in a small, local, string-keyed store:
//! the serialized post collection, the session flags, and one avatar key per
//! user. This crate defines the contract every backend implements and ships
//! two backends.
//!
//! # Storage Backends
//!
//! All backends implement the [`KeyValueStore`] trait:
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileKvStore`] -- one JSON object on disk, rewritten on every mutation
//!
//! # Design Rules
//!
//! 1. Each call is atomic on its own; there is no grouping across calls.
//! 2. The last writer to a key wins.
//! 3. The store never interprets values -- it is a pure string store.
//! 4. Backends propagate every failure; deciding to swallow one is the
//!    caller's business.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKvStore;
pub use memory::InMemoryKvStore;
pub use traits::{KeyValueStore, SharedStore};
