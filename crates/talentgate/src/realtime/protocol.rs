//! Wire types for the websocket channel, decoded once at the boundary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Event type tag for hub-internal viewer list announcements.
pub const VIEWERS_UPDATE: &str = "VIEWERS_UPDATE";

/// Identity a connection claims during the connect handshake. Not unique
/// across connections; a reconnecting client is a new connection carrying
/// the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub display_name: String,
}

/// One entry in a resource's viewer list, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: i64,
    pub display_name: String,
}

/// Payload of the presence messages clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTarget {
    pub resource_id: i64,
}

/// Client-originated presence message.
///
/// Unrecognized tags decode to [`ClientMessage::Unknown`] so new message
/// types added on the client side stay a no-op here instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    #[serde(rename = "ENTER_VIEW")]
    EnterView(ViewTarget),
    #[serde(rename = "EXIT_VIEW")]
    ExitView(ViewTarget),
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Decode a raw frame. Malformed input yields `None`; the caller drops
    /// the frame without touching the connection.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Outbound envelope: a type tag plus an opaque payload the hub passes
/// through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Value,
}

impl Event {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Viewer list announcement for one resource.
    pub fn viewers_update(resource_id: i64, viewers: Vec<Viewer>) -> Self {
        Self::new(
            VIEWERS_UPDATE,
            json!({ "resourceId": resource_id, "viewers": viewers }),
        )
    }
}
