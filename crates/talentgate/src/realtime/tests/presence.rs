use crate::realtime::presence::PresenceIndex;

#[test]
fn enter_then_viewers_of_returns_single_entry() {
    let mut index = PresenceIndex::new();
    index.enter(42, 1, "Ana");

    let viewers = index.viewers_of(42);
    assert_eq!(viewers.len(), 1);
    assert_eq!(viewers[0].id, 1);
    assert_eq!(viewers[0].display_name, "Ana");
}

#[test]
fn repeated_enter_is_idempotent_and_last_name_wins() {
    let mut index = PresenceIndex::new();
    index.enter(42, 1, "Ana");
    index.enter(42, 1, "Ana B.");
    index.enter(42, 1, "Ana Belen");

    let viewers = index.viewers_of(42);
    assert_eq!(viewers.len(), 1);
    assert_eq!(viewers[0].display_name, "Ana Belen");
}

#[test]
fn viewers_keep_insertion_order() {
    let mut index = PresenceIndex::new();
    index.enter(42, 3, "Carla");
    index.enter(42, 1, "Ana");
    index.enter(42, 2, "Beto");
    // re-entering does not move Carla to the back
    index.enter(42, 3, "Carla");

    let ids: Vec<i64> = index.viewers_of(42).iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn exit_removes_entry_and_is_noop_when_absent() {
    let mut index = PresenceIndex::new();
    index.enter(42, 1, "Ana");
    index.exit(42, 1);
    assert!(index.viewers_of(42).is_empty());

    // absent user and absent resource are both no-ops
    index.exit(42, 1);
    index.exit(99, 1);
    assert!(index.viewers_of(99).is_empty());
}

#[test]
fn exit_drops_empty_resource_buckets() {
    let mut index = PresenceIndex::new();
    index.enter(42, 1, "Ana");
    index.exit(42, 1);
    assert_eq!(index.tracked_resources(), 0);
}

#[test]
fn clear_user_reports_exactly_the_affected_resources() {
    let mut index = PresenceIndex::new();
    index.enter(1, 7, "Gina");
    index.enter(2, 7, "Gina");
    index.enter(3, 8, "Hugo");

    let mut affected = index.clear_user(7);
    affected.sort_unstable();
    assert_eq!(affected, vec![1, 2]);

    assert!(index.viewers_of(1).is_empty());
    assert!(index.viewers_of(2).is_empty());
    assert_eq!(index.viewers_of(3).len(), 1);
}

#[test]
fn clear_user_with_no_entries_is_empty() {
    let mut index = PresenceIndex::new();
    index.enter(1, 8, "Hugo");
    assert!(index.clear_user(7).is_empty());
    assert_eq!(index.viewers_of(1).len(), 1);
}

#[test]
fn clear_user_preserves_remaining_viewers() {
    let mut index = PresenceIndex::new();
    index.enter(42, 1, "Ana");
    index.enter(42, 2, "Beto");
    index.enter(42, 3, "Carla");

    index.clear_user(2);

    let ids: Vec<i64> = index.viewers_of(42).iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 3]);
}
