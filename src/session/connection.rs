use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::registry::{DeliveryError, Handler, PostId, Registry, Subscription};
use crate::storage::PostStore;
use crate::transport::message::{CODE_INTERNAL, CODE_NOT_FOUND, InboundEvent, OutboundEvent};

/// Per-connection owner of that connection's subscriptions.
///
/// Holds at most one subscription per post; subscribing again to the same
/// post replaces the earlier subscription instead of accumulating. The
/// close transition runs at most once and removes everything this session
/// registered, so an abandoned connection leaves nothing in the registry.
pub struct ConnectionSession {
    registry: Arc<Registry>,
    store: Arc<dyn PostStore>,
    tx: UnboundedSender<OutboundEvent>,
    subscriptions: HashMap<PostId, Subscription>,
    closed: bool,
}

impl ConnectionSession {
    pub fn new(
        registry: Arc<Registry>,
        store: Arc<dyn PostStore>,
        tx: UnboundedSender<OutboundEvent>,
    ) -> Self {
        Self {
            registry,
            store,
            tx,
            subscriptions: HashMap::new(),
            closed: false,
        }
    }

    /// Applies one decoded control event from the connection.
    pub async fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Subscribe { post_id } => self.handle_subscribe(&post_id).await,
            InboundEvent::Unsubscribe { post_id } => self.handle_unsubscribe(&post_id),
        }
    }

    /// Subscribes this connection to a post and delivers the current state
    /// immediately, without waiting for the next mutation.
    ///
    /// A nonexistent post is answered with a 404 error event and creates
    /// no subscription. An existing subscription for the same post is
    /// unsubscribed first.
    pub async fn handle_subscribe(&mut self, post_id: &str) {
        if self.closed {
            return;
        }

        match self.store.post_exists(post_id).await {
            Ok(true) => {}
            Ok(false) => {
                self.send(OutboundEvent::error(CODE_NOT_FOUND, "post not found"));
                return;
            }
            Err(err) => {
                warn!(post_id, error = %err, "post existence check failed");
                self.send(OutboundEvent::error(CODE_INTERNAL, "internal error"));
                return;
            }
        }

        if let Some(previous) = self.subscriptions.remove(post_id) {
            self.registry.unsubscribe(&previous);
        }

        let handler = delivery_handler(self.store.clone(), self.tx.clone(), post_id.to_string());
        let sub = self.registry.subscribe(post_id, handler);
        self.subscriptions.insert(post_id.to_string(), sub.clone());

        if let Err(err) = (sub.handler)().await {
            warn!(post_id, subscription = %sub.id, error = %err, "initial delivery failed");
        }
    }

    /// Drops this connection's subscription for a post, if it holds one.
    pub fn handle_unsubscribe(&mut self, post_id: &str) {
        if self.closed {
            return;
        }

        if let Some(sub) = self.subscriptions.remove(post_id) {
            self.registry.unsubscribe(&sub);
        }
    }

    /// Terminal transition: unsubscribes everything this session owns.
    ///
    /// Safe to call more than once; only the first call does anything.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        debug!(subscriptions = self.subscriptions.len(), "closing session");
        for (_, sub) in self.subscriptions.drain() {
            self.registry.unsubscribe(&sub);
        }
    }

    /// Number of subscriptions this session currently holds.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn send(&self, event: OutboundEvent) {
        // Best effort: the connection may already be gone.
        let _ = self.tx.send(event);
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builds the delivery callback registered for one subscription.
///
/// Every invocation re-fetches the post and pushes an `updated` event down
/// the owning connection. Invocations are serialized through a gate mutex
/// so a slower, older delivery never interleaves with a newer one. A fetch
/// failure is reported to this subscriber as a 500 error event and returned
/// to the invoker for logging; the subscription itself stays registered.
fn delivery_handler(
    store: Arc<dyn PostStore>,
    tx: UnboundedSender<OutboundEvent>,
    post_id: String,
) -> Handler {
    let gate = Arc::new(Mutex::new(()));

    let handler: Handler = Arc::new(move || {
        let store = store.clone();
        let tx = tx.clone();
        let post_id = post_id.clone();
        let gate = gate.clone();

        Box::pin(async move {
            let _running = gate.lock().await;
            match store.get_post(&post_id).await {
                Ok(snapshot) => tx
                    .send(OutboundEvent::updated(snapshot))
                    .map_err(|_| DeliveryError::ConnectionClosed),
                Err(err) => {
                    let _ = tx.send(OutboundEvent::error(CODE_INTERNAL, "failed to load post"));
                    Err(DeliveryError::Fetch(err))
                }
            }
        })
    });
    handler
}
