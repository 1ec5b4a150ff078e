use std::sync::Arc;

use tracing::{debug, warn};

use crate::registry::Registry;

/// Fire-and-forget fan-out of post updates.
///
/// Cloneable handle over the shared [`Registry`]; this is what the
/// mutation path holds. `publish` copies the current subscriber group out
/// under the registry's read lock and invokes every handler on its own
/// task, so a slow or hung subscriber never delays the caller or the
/// other subscribers, and a failing one is logged and skipped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Notifies every subscriber of `post_id` that the post changed.
    ///
    /// Returns immediately. A post with no subscribers is a no-op. Handler
    /// failures are logged per subscription and never propagate here.
    pub fn publish(&self, post_id: &str) {
        let registry = self.registry.clone();
        let post_id = post_id.to_string();

        tokio::spawn(async move {
            let subs = registry.snapshot(&post_id);
            debug!(%post_id, subscribers = subs.len(), "publishing update");

            for sub in subs {
                let post_id = post_id.clone();
                tokio::spawn(async move {
                    if let Err(err) = (sub.handler)().await {
                        warn!(
                            %post_id,
                            subscription = %sub.id,
                            error = %err,
                            "delivery failed"
                        );
                    }
                });
            }
        });
    }
}
