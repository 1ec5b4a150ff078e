//! The `transport` module is the WebSocket gateway.
//!
//! It accepts duplex connections, decodes inbound text frames into typed
//! control events, drives the per-connection session with them, and
//! serializes outbound events back into text frames. Unparseable frames
//! are answered with a 400 error event, never with a connection close.

pub mod message;
pub mod websocket;

pub use websocket::start_websocket_server;
