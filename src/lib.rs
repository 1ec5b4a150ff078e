//! # livepost
//!
//! `livepost` is the live post-update notification engine of a blog
//! backend: it tracks which open WebSocket connections are interested in
//! which posts and pushes a fresh snapshot of a post to every subscriber
//! whenever the post changes (new comment, like toggled).
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `registry`: the process-wide subscription index, mapping post ids to subscribers.
//! - `dispatch`: fire-and-forget fan-out that keeps delivery off the mutation path.
//! - `session`: per-connection owner of subscriptions, responsible for their cleanup.
//! - `transport`: the WebSocket gateway and the inbound/outbound event protocol.
//! - `storage`: the `PostStore` seam to the backend that owns posts, plus an in-memory store.
//! - `config`: loading and merging of server configuration.

pub mod config;
pub mod dispatch;
pub mod logging;
pub mod registry;
pub mod session;
pub mod storage;
pub mod transport;
