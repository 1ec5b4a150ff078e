use chrono::Utc;

use super::memory::MemoryPostStore;
use super::model::{CommentSnapshot, PostSnapshot, UserRef};
use super::store::{PostStore, StorageError};

fn sample_post(id: &str) -> PostSnapshot {
    PostSnapshot {
        id: id.to_string(),
        content: "hello".to_string(),
        timestamp: Utc::now(),
        user: UserRef {
            username: "alice".to_string(),
            icon_id: "icon-1".to_string(),
            display_name: None,
        },
        likes: 0,
        comments: Vec::new(),
    }
}

#[tokio::test]
async fn test_post_exists() {
    let store = MemoryPostStore::new();
    store.insert_post(sample_post("p1"));

    assert!(store.post_exists("p1").await.unwrap());
    assert!(!store.post_exists("p2").await.unwrap());
}

#[tokio::test]
async fn test_get_post_not_found() {
    let store = MemoryPostStore::new();
    let err = store.get_post("missing").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn test_mutations_visible_in_next_snapshot() {
    let store = MemoryPostStore::new();
    store.insert_post(sample_post("p1"));

    store.set_likes("p1", 3);
    store.add_comment(
        "p1",
        CommentSnapshot {
            id: "c1".to_string(),
            user: UserRef {
                username: "bob".to_string(),
                icon_id: "icon-2".to_string(),
                display_name: Some("Bob".to_string()),
            },
            content: "nice post".to_string(),
            timestamp: Utc::now(),
        },
    );

    let post = store.get_post("p1").await.unwrap();
    assert_eq!(post.likes, 3);
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].user.username, "bob");
}
