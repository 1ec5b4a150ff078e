use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

pub type PostId = String;
pub type SubscriptionId = Uuid;

/// The delivery callback attached to a subscription.
///
/// Takes no input; a fresh invocation re-fetches the post and pushes the
/// snapshot down the owning connection. Shared behind an `Arc` so the
/// registry can hand out copies without cloning the closure itself.
pub type Handler = Arc<dyn Fn() -> BoxFuture<'static, Result<(), DeliveryError>> + Send + Sync>;

/// Why a single delivery attempt failed.
///
/// Never propagated to the mutation path that triggered the publish; the
/// dispatcher logs it and moves on to the next subscriber.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("snapshot fetch failed: {0}")]
    Fetch(#[from] StorageError),

    #[error("connection closed")]
    ConnectionClosed,
}

/// A registered interest, tied to one connection, in updates for one post.
///
/// Created by [`Registry::subscribe`](super::Registry::subscribe) and held
/// by the creating session purely so it can be unsubscribed later; the
/// registry keeps the authoritative copy.
#[derive(Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub post_id: PostId,
    pub handler: Handler,
}

impl Subscription {
    pub fn new(post_id: &str, handler: Handler) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id: post_id.to_string(),
            handler,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("post_id", &self.post_id)
            .finish_non_exhaustive()
    }
}
