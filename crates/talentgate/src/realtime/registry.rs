//! Active connection tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::protocol::Identity;

/// Outbound queue depth per connection. A client that falls this far behind
/// starts losing frames rather than stalling the fan-out for everyone else.
pub const OUTBOUND_QUEUE_DEPTH: usize = 64;

static CONNECTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Opaque id for one transport connection. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub(crate) fn next() -> Self {
        Self(CONNECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry entry for one live connection: the claimed identity plus the
/// sender side of its outbound frame queue. The socket task owns the
/// receiver and the transport itself; the hub only queues frames.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub identity: Identity,
    sender: mpsc::Sender<Arc<String>>,
}

impl ConnectionHandle {
    pub fn new(identity: Identity, sender: mpsc::Sender<Arc<String>>) -> Self {
        Self {
            id: ConnectionId::next(),
            identity,
            sender,
        }
    }

    /// Queue a frame without blocking. Returns `false` when the client's
    /// queue is full or its socket task is gone; the caller treats that as a
    /// delivery failure for this recipient only.
    pub fn send(&self, frame: Arc<String>) -> bool {
        self.sender.try_send(frame).is_ok()
    }
}

/// Active connections keyed by handle id.
///
/// Not internally synchronized: the hub serializes all access behind its
/// state lock.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: Arc<ConnectionHandle>) {
        self.connections.insert(handle.id, handle);
    }

    /// Remove a connection. Idempotent; an absent handle yields `None`.
    pub fn unregister(&mut self, id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(&id)
    }

    pub fn identity_of(&self, id: ConnectionId) -> Option<&Identity> {
        self.connections.get(&id).map(|handle| &handle.identity)
    }

    /// Snapshot of every live connection, safe to iterate while the registry
    /// keeps mutating under later lock acquisitions.
    pub fn all_active(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
