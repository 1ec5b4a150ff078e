//! The `storage` module is the seam to the relational backend that owns
//! posts, comments and likes.
//!
//! The notification engine never talks SQL itself; it only needs to check
//! that a post exists and to fetch a fresh snapshot of it. Both operations
//! go through the [`PostStore`] trait so the engine can be driven by the
//! real database layer in production and by [`MemoryPostStore`] in tests.

pub mod memory;
pub mod model;
pub mod store;

pub use memory::MemoryPostStore;
pub use model::{CommentSnapshot, PostSnapshot, UserRef};
pub use store::{PostStore, StorageError};

#[cfg(test)]
mod tests;
