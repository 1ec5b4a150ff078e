use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::registry::subscription::{Handler, PostId, Subscription, SubscriptionId};

type SubscriptionGroup = HashMap<SubscriptionId, Subscription>;

/// The process-wide subscription index.
///
/// Maps post ids to their subscription groups. Structural mutation
/// (`subscribe`, `unsubscribe`) takes the write lock; `snapshot` takes the
/// read lock, so any number of concurrent publishes can copy their groups
/// in parallel while never racing a mutation. No I/O and no handler
/// invocation happens while a lock is held.
///
/// Invariant: a group is present in the map iff it is non-empty. The last
/// unsubscribe for a post removes the group itself, so abandoned posts
/// leave nothing behind.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<PostId, SubscriptionGroup>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a post and returns the new subscription.
    ///
    /// Always succeeds; whether the post actually exists is the caller's
    /// concern. The group for the post is created lazily on first use.
    pub fn subscribe(&self, post_id: &str, handler: Handler) -> Subscription {
        let sub = Subscription::new(post_id, handler);
        let mut groups = self.groups.write().unwrap();
        groups
            .entry(sub.post_id.clone())
            .or_default()
            .insert(sub.id, sub.clone());

        debug!(post_id, subscription = %sub.id, "subscribed");
        sub
    }

    /// Removes a subscription. Idempotent: removing one that is not
    /// registered is a no-op. Drops the whole group once it is empty.
    pub fn unsubscribe(&self, sub: &Subscription) {
        let mut groups = self.groups.write().unwrap();
        if let Some(group) = groups.get_mut(&sub.post_id) {
            group.remove(&sub.id);
            if group.is_empty() {
                groups.remove(&sub.post_id);
            }
            debug!(post_id = %sub.post_id, subscription = %sub.id, "unsubscribed");
        }
    }

    /// Copies out the subscriptions currently registered for a post.
    ///
    /// Returns an empty vec when nobody is listening. Callers invoke the
    /// handlers after this returns, outside the lock.
    pub fn snapshot(&self, post_id: &str) -> Vec<Subscription> {
        let groups = self.groups.read().unwrap();
        groups
            .get(post_id)
            .map(|group| group.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether any subscription is registered for the post.
    pub fn contains_group(&self, post_id: &str) -> bool {
        self.groups.read().unwrap().contains_key(post_id)
    }

    /// Number of subscriptions registered for the post.
    pub fn group_len(&self, post_id: &str) -> usize {
        self.groups
            .read()
            .unwrap()
            .get(post_id)
            .map_or(0, HashMap::len)
    }

    /// Total number of subscriptions across all posts.
    pub fn subscription_count(&self) -> usize {
        self.groups.read().unwrap().values().map(HashMap::len).sum()
    }
}
