//! Per-resource index of which users are currently viewing what.

use indexmap::IndexMap;

use super::protocol::Viewer;

/// Maps `resource id -> (user id -> display name)`.
///
/// Insertion-ordered so viewer lists render in the order people opened the
/// record. A user appears at most once per resource; entries are removed on
/// explicit exit or when the owning connection disconnects, never left stale.
/// Not internally synchronized: the hub serializes all access behind its
/// state lock.
#[derive(Debug, Default)]
pub struct PresenceIndex {
    viewers: IndexMap<i64, IndexMap<i64, String>>,
}

impl PresenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `user_id` is viewing `resource_id`. Repeat calls are
    /// idempotent; the latest display name wins and the original position in
    /// the viewer list is kept.
    pub fn enter(&mut self, resource_id: i64, user_id: i64, display_name: &str) {
        self.viewers
            .entry(resource_id)
            .or_default()
            .insert(user_id, display_name.to_string());
    }

    /// Remove the entry if present; no-op otherwise.
    pub fn exit(&mut self, resource_id: i64, user_id: i64) {
        let now_empty = match self.viewers.get_mut(&resource_id) {
            Some(entries) => {
                entries.shift_remove(&user_id);
                entries.is_empty()
            }
            None => return,
        };
        if now_empty {
            self.viewers.shift_remove(&resource_id);
        }
    }

    /// Snapshot of the current viewer list in insertion order.
    pub fn viewers_of(&self, resource_id: i64) -> Vec<Viewer> {
        self.viewers
            .get(&resource_id)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(id, display_name)| Viewer {
                        id: *id,
                        display_name: display_name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop every entry held by `user_id`, returning the affected resource
    /// ids so their viewer lists can be re-announced.
    pub fn clear_user(&mut self, user_id: i64) -> Vec<i64> {
        let mut affected = Vec::new();
        self.viewers.retain(|resource_id, entries| {
            if entries.shift_remove(&user_id).is_some() {
                affected.push(*resource_id);
            }
            !entries.is_empty()
        });
        affected
    }

    /// Number of resources with at least one viewer.
    pub fn tracked_resources(&self) -> usize {
        self.viewers.len()
    }
}
