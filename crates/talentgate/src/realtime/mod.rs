//! Realtime notification hub for the recruiting backend.
//!
//! Tracks which clients are connected, which application record each user is
//! currently viewing, and fans out state-change events to every connected
//! client. Presence and registry state live behind a single lock inside
//! [`NotificationHub`]; broadcasts iterate a snapshot of the active set so
//! connects and disconnects can race with a fan-out safely.
//!
//! Data flow: a socket task registers through [`NotificationHub::connect`],
//! inbound frames are routed by [`NotificationHub::handle_message`] (mutating
//! the [`PresenceIndex`] and re-announcing viewer lists), and the business
//! layer pushes domain events through [`NotificationHub::broadcast`]. On
//! disconnect the hub clears the identity's presence entries and re-announces
//! the viewer list of every affected resource.

pub mod hub;
pub mod presence;
pub mod protocol;
pub mod registry;

#[cfg(test)]
mod tests;

pub use hub::NotificationHub;
pub use presence::PresenceIndex;
pub use protocol::{ClientMessage, Event, Identity, Viewer, VIEWERS_UPDATE};
pub use registry::{ConnectionHandle, ConnectionId, ConnectionRegistry, OUTBOUND_QUEUE_DEPTH};
