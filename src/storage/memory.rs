use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::storage::model::{CommentSnapshot, PostSnapshot};
use crate::storage::store::{PostStore, StorageError};

/// An in-memory [`PostStore`].
///
/// Backs the binary when no database layer is wired in and doubles as the
/// store used by the test suite. Mutators mirror the write paths of the
/// real backend (new comment, like count change) so tests can mutate a
/// post between two deliveries and observe a fresh snapshot each time.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<String, PostSnapshot>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a post.
    pub fn insert_post(&self, post: PostSnapshot) {
        let mut posts = self.posts.write().unwrap();
        posts.insert(post.id.clone(), post);
    }

    /// Appends a comment to an existing post. Unknown posts are ignored.
    pub fn add_comment(&self, post_id: &str, comment: CommentSnapshot) {
        let mut posts = self.posts.write().unwrap();
        if let Some(post) = posts.get_mut(post_id) {
            post.comments.push(comment);
        }
    }

    /// Sets the like count of an existing post. Unknown posts are ignored.
    pub fn set_likes(&self, post_id: &str, likes: i64) {
        let mut posts = self.posts.write().unwrap();
        if let Some(post) = posts.get_mut(post_id) {
            post.likes = likes;
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn post_exists(&self, post_id: &str) -> Result<bool, StorageError> {
        let posts = self.posts.read().unwrap();
        Ok(posts.contains_key(post_id))
    }

    async fn get_post(&self, post_id: &str) -> Result<PostSnapshot, StorageError> {
        let posts = self.posts.read().unwrap();
        posts.get(post_id).cloned().ok_or(StorageError::NotFound)
    }
}
