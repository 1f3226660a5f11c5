//! The notification hub: one explicitly constructed instance owns the
//! connection registry and the presence index behind a single lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use super::presence::PresenceIndex;
use super::protocol::{ClientMessage, Event, Identity, Viewer};
use super::registry::{ConnectionHandle, ConnectionId, ConnectionRegistry, OUTBOUND_QUEUE_DEPTH};

/// Registry and presence index behind one mutex. Every mutation and every
/// snapshot read goes through this lock; fan-out happens on snapshots taken
/// under it, never on the live collection.
#[derive(Default)]
struct HubState {
    registry: ConnectionRegistry,
    presence: PresenceIndex,
}

/// Realtime notification hub.
///
/// Created once at process start and shared via `Arc` with the socket layer
/// and the business services. All state is process-lifetime only; the
/// database stays the source of truth.
pub struct NotificationHub {
    state: Mutex<HubState>,
    // Mirrors registry.len() so health/metrics reads skip the lock.
    active_count: AtomicUsize,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HubState::default()),
            active_count: AtomicUsize::new(0),
        }
    }

    /// Register a transport under its claimed identity. Returns the handle id
    /// and the receiver the socket task must drain into the transport.
    pub async fn connect(&self, identity: Identity) -> (ConnectionId, mpsc::Receiver<Arc<String>>) {
        let (sender, receiver) = mpsc::channel(OUTBOUND_QUEUE_DEPTH);
        let handle = Arc::new(ConnectionHandle::new(identity, sender));
        let id = handle.id;

        let mut state = self.state.lock().await;
        debug!(connection = %id, user = handle.identity.id, "connection registered");
        state.registry.register(handle);
        self.active_count.store(state.registry.len(), Ordering::Relaxed);

        (id, receiver)
    }

    /// Tear down a connection: unregister it, clear its identity's presence
    /// entries, and re-announce the viewer list of every affected resource.
    /// Idempotent; a second call for the same id is a no-op.
    ///
    /// Returns the affected resource ids.
    pub async fn disconnect(&self, id: ConnectionId) -> Vec<i64> {
        let mut state = self.state.lock().await;
        let Some(handle) = state.registry.unregister(id) else {
            return Vec::new();
        };
        self.active_count.store(state.registry.len(), Ordering::Relaxed);

        let affected = state.presence.clear_user(handle.identity.id);
        debug!(
            connection = %id,
            user = handle.identity.id,
            resources = affected.len(),
            "connection closed"
        );

        let recipients = state.registry.all_active();
        let updates: Vec<Event> = affected
            .iter()
            .map(|resource_id| Event::viewers_update(*resource_id, state.presence.viewers_of(*resource_id)))
            .collect();
        drop(state);

        for event in &updates {
            fan_out(&recipients, event);
        }
        affected
    }

    /// Route one raw frame from a client.
    ///
    /// Malformed input is dropped silently, unrecognized types are a no-op,
    /// and a frame racing a disconnect (no registered identity) is dropped.
    /// Nothing here terminates the connection.
    pub async fn handle_message(&self, id: ConnectionId, raw: &str) {
        let Some(message) = ClientMessage::decode(raw) else {
            debug!(connection = %id, "dropping undecodable frame");
            return;
        };

        let mut state = self.state.lock().await;
        let Some(identity) = state.registry.identity_of(id).cloned() else {
            debug!(connection = %id, "dropping frame from unregistered connection");
            return;
        };

        let resource_id = match message {
            ClientMessage::EnterView(target) => {
                state
                    .presence
                    .enter(target.resource_id, identity.id, &identity.display_name);
                target.resource_id
            }
            ClientMessage::ExitView(target) => {
                state.presence.exit(target.resource_id, identity.id);
                target.resource_id
            }
            ClientMessage::Unknown => return,
        };

        let event = Event::viewers_update(resource_id, state.presence.viewers_of(resource_id));
        let recipients = state.registry.all_active();
        drop(state);

        fan_out(&recipients, &event);
    }

    /// Fire-and-forget fan-out of a domain event to every live connection.
    /// Completes without error when nobody is connected; per-recipient
    /// delivery failures are absorbed.
    pub async fn broadcast(&self, event_type: &str, payload: Value) {
        let recipients = self.state.lock().await.registry.all_active();
        fan_out(&recipients, &Event::new(event_type, payload));
    }

    /// Re-announce the current viewer list for one resource.
    pub async fn broadcast_viewers(&self, resource_id: i64) {
        let (recipients, event) = {
            let state = self.state.lock().await;
            (
                state.registry.all_active(),
                Event::viewers_update(resource_id, state.presence.viewers_of(resource_id)),
            )
        };
        fan_out(&recipients, &event);
    }

    /// Snapshot of who is viewing `resource_id` right now.
    pub async fn viewers_of(&self, resource_id: i64) -> Vec<Viewer> {
        self.state.lock().await.presence.viewers_of(resource_id)
    }

    /// Number of active connections.
    pub fn connection_count(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize once, then attempt delivery to every recipient in the snapshot.
/// A failed send never aborts the rest of the fan-out and never unregisters
/// the handle; disconnect detection belongs to the socket task.
fn fan_out(recipients: &[Arc<ConnectionHandle>], event: &Event) {
    let frame = match serde_json::to_string(event) {
        Ok(json) => Arc::new(json),
        Err(error) => {
            warn!(event_type = %event.event_type, %error, "failed to serialize event");
            return;
        }
    };

    let mut delivered = 0usize;
    for handle in recipients {
        if handle.send(Arc::clone(&frame)) {
            delivered += 1;
        } else {
            warn!(
                connection = %handle.id,
                event_type = %event.event_type,
                "dropping frame for slow or closed client"
            );
        }
    }
    debug!(
        event_type = %event.event_type,
        recipients = recipients.len(),
        delivered,
        "broadcast event"
    );
}
