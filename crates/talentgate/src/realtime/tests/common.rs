use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::realtime::hub::NotificationHub;
use crate::realtime::protocol::Identity;
use crate::realtime::registry::ConnectionId;

pub(super) fn identity(id: i64, display_name: &str) -> Identity {
    Identity {
        id,
        display_name: display_name.to_string(),
    }
}

pub(super) async fn connect(
    hub: &NotificationHub,
    id: i64,
    display_name: &str,
) -> (ConnectionId, mpsc::Receiver<Arc<String>>) {
    hub.connect(identity(id, display_name)).await
}

/// Pop the next queued frame and parse it, panicking when none is pending.
pub(super) fn next_event(rx: &mut mpsc::Receiver<Arc<String>>) -> Value {
    let frame = rx.try_recv().expect("a frame should be queued");
    serde_json::from_str(&frame).expect("queued frames are valid JSON")
}

pub(super) fn drain(rx: &mut mpsc::Receiver<Arc<String>>) {
    while rx.try_recv().is_ok() {}
}

pub(super) fn enter_view(resource_id: i64) -> String {
    format!(r#"{{"type":"ENTER_VIEW","payload":{{"resourceId":{resource_id}}}}}"#)
}

pub(super) fn exit_view(resource_id: i64) -> String {
    format!(r#"{{"type":"EXIT_VIEW","payload":{{"resourceId":{resource_id}}}}}"#)
}
