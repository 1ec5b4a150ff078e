//! The `registry` module is the process-wide subscription index.
//!
//! It owns the mapping from post id to the set of active subscriptions and
//! is the sole source of truth for "who is listening to what". The registry
//! itself does no I/O; delivery happens in the `dispatch` module against a
//! snapshot copied out under the read lock.

pub mod engine;
pub mod subscription;

pub use engine::Registry;
pub use subscription::{DeliveryError, Handler, PostId, Subscription, SubscriptionId};
