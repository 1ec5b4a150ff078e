use serde::{Deserialize, Serialize};

use crate::storage::PostSnapshot;

/// Error codes carried in outbound `error` events, mirroring HTTP status
/// semantics.
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_NOT_FOUND: u16 = 404;
pub const CODE_INTERNAL: u16 = 500;

/// A control event sent by a client over the WebSocket.
///
/// Wire shape: `{"eventType": "subscribe"|"unsubscribe", "postId": "…"}`.
/// Anything that does not decode into this enum is answered with a 400
/// error event; the connection stays open.
#[derive(Debug, Deserialize)]
#[serde(tag = "eventType")]
pub enum InboundEvent {
    #[serde(rename = "subscribe")]
    Subscribe {
        #[serde(rename = "postId")]
        post_id: String,
    },

    #[serde(rename = "unsubscribe")]
    Unsubscribe {
        #[serde(rename = "postId")]
        post_id: String,
    },
}

/// An event pushed to a client.
///
/// Wire shape: `{"eventType": "updated"|"error", "data": …}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "data")]
pub enum OutboundEvent {
    #[serde(rename = "updated")]
    Updated(PostSnapshot),

    #[serde(rename = "error")]
    Error(ErrorBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl OutboundEvent {
    pub fn updated(snapshot: PostSnapshot) -> Self {
        Self::Updated(snapshot)
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::Error(ErrorBody {
            code,
            message: message.into(),
        })
    }
}
