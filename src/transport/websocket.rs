use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{WebSocketStream, accept_async};
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::registry::Registry;
use crate::session::ConnectionSession;
use crate::storage::PostStore;
use crate::transport::message::{CODE_BAD_REQUEST, InboundEvent, OutboundEvent};

/// Accepts WebSocket connections and runs one session per connection
/// until the listener fails.
pub async fn start_websocket_server(
    addr: &str,
    registry: Arc<Registry>,
    store: Arc<dyn PostStore>,
) {
    let listener = TcpListener::bind(addr).await.expect("can't bind");
    info!(addr, "websocket gateway listening");

    while let Ok((stream, peer)) = listener.accept().await {
        let registry = registry.clone();
        let store = store.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(err) => {
                    warn!(%peer, error = %err, "websocket handshake failed");
                    return;
                }
            };

            debug!(%peer, "connection opened");
            handle_connection(ws_stream, registry, store).await;
            debug!(%peer, "connection closed");
        });
    }
}

/// Drives one connection: forwards outbound events from the session's
/// channel to the socket and feeds decoded inbound frames to the session.
///
/// Whatever ends the read loop (close frame, protocol error, plain EOF),
/// the session's close transition runs exactly once before returning.
async fn handle_connection(
    ws_stream: WebSocketStream<TcpStream>,
    registry: Arc<Registry>,
    store: Arc<dyn PostStore>,
) {
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundEvent>();

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(err) => {
                    error!(error = %err, "failed to serialize outbound event");
                    continue;
                }
            };
            if ws_sender.send(WsMessage::text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut session = ConnectionSession::new(registry, store, tx.clone());

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            WsMessage::Text(text) => match serde_json::from_str::<InboundEvent>(&text) {
                Ok(event) => session.handle_event(event).await,
                Err(err) => {
                    debug!(error = %err, "rejecting malformed event");
                    let _ = tx.send(OutboundEvent::error(CODE_BAD_REQUEST, "malformed event"));
                }
            },
            WsMessage::Close(_) => break,
            // Pings are answered by tungstenite itself; binary frames are
            // not part of the protocol.
            _ => {}
        }
    }

    session.close();
    drop(session);
    drop(tx);
    let _ = send_task.await;
}
