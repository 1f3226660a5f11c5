//! Websocket endpoint: handshake validation, then a read loop feeding the
//! notification hub and a writer task draining the hub's outbound queue.

use crate::infra::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use talentgate::realtime::{Identity, NotificationHub};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectParams {
    id: i64,
    display_name: String,
    token: String,
}

/// `GET /ws?id=<i64>&display_name=<string>&token=<jwt>`
///
/// The claimed identity is only accepted once the token validates and its
/// subject matches the claimed id; otherwise the upgrade is rejected before
/// the hub ever sees the connection.
pub(crate) async fn websocket_endpoint(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    if let Err(error) = state.tokens.validate_for_user(&params.token, params.id) {
        warn!(user = params.id, %error, "rejecting websocket handshake");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let identity = Identity {
        id: params.id,
        display_name: params.display_name,
    };
    ws.on_upgrade(move |socket| serve_connection(socket, state.hub.clone(), identity))
}

async fn serve_connection(socket: WebSocket, hub: Arc<NotificationHub>, identity: Identity) {
    let (mut sink, mut stream) = socket.split();
    let (connection_id, mut outbound) = hub.connect(identity).await;

    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if sink.send(Message::Text((*frame).clone())).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(raw)) => hub.handle_message(connection_id, &raw).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(error) => {
                debug!(connection = %connection_id, %error, "websocket read failed");
                break;
            }
        }
    }

    hub.disconnect(connection_id).await;
    writer.abort();
}
