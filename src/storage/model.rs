use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The author of a post or comment as embedded in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub username: String,
    pub icon_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A single comment as embedded in a post snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSnapshot {
    pub id: String,
    pub user: UserRef,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A freshly fetched, serializable representation of a post's current
/// state, including its author, like count and comments.
///
/// This is what subscribers receive in an `updated` event. It is always
/// re-read from storage at delivery time, never cached, so two deliveries
/// for the same post may differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSnapshot {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub user: UserRef,
    pub likes: i64,
    pub comments: Vec<CommentSnapshot>,
}
