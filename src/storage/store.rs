use async_trait::async_trait;
use thiserror::Error;

use crate::storage::model::PostSnapshot;

/// Errors surfaced by a post store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("post not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read access to posts, as needed by the notification engine.
///
/// `post_exists` is consulted once when a subscription is created;
/// `get_post` is called on every delivery so subscribers always see the
/// current state of the post.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn post_exists(&self, post_id: &str) -> Result<bool, StorageError>;

    async fn get_post(&self, post_id: &str) -> Result<PostSnapshot, StorageError>;
}
