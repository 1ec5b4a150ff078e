//! The `session` module holds the per-connection state machine.
//!
//! A [`ConnectionSession`] owns every subscription created over one
//! WebSocket connection and guarantees their removal from the registry
//! when the connection ends, however it ends. It is driven single-threaded
//! by the connection's read loop, so events on one connection apply in
//! arrival order.

pub mod connection;

pub use connection::ConnectionSession;
