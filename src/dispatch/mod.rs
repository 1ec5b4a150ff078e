//! The `dispatch` module decouples "a mutation happened" from "deliver it".
//!
//! HTTP write handlers (comment creation, like toggle) call
//! [`Dispatcher::publish`] after a successful storage write. The call
//! returns immediately; delivery runs on background tasks and its outcome
//! never reaches the mutation path.

pub mod dispatcher;

pub use dispatcher::Dispatcher;

#[cfg(test)]
mod tests;
