//! Unit tests for aggregate root lifecycle invariants

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::aggregate::{Aggregate, AggregateRoot};
use crate::domain::events::DomainEvent;

#[derive(Debug, Clone, PartialEq)]
enum NoteEvent {
    Created(u32),
    Edited(u32),
}

impl DomainEvent for NoteEvent {
    fn event_name(&self) -> &'static str {
        match self {
            NoteEvent::Created(_) => "note.created",
            NoteEvent::Edited(_) => "note.edited",
        }
    }
}

#[derive(Debug)]
struct Note {
    root: AggregateRoot<NoteEvent>,
    published: u32,
}

impl Note {
    fn new() -> Self {
        Self {
            root: AggregateRoot::new(),
            published: 0,
        }
    }
}

impl Aggregate for Note {
    type Event = NoteEvent;

    const AGGREGATE_TYPE: &'static str = "note";

    fn root(&self) -> &AggregateRoot<NoteEvent> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot<NoteEvent> {
        &mut self.root
    }

    fn publish_events(&mut self) {
        self.published += 1;
    }
}

#[test]
fn test_new_root_timestamps() {
    let root = AggregateRoot::<NoteEvent>::new();
    assert_eq!(root.created_at(), root.updated_at());
    assert!(root.deleted_at().is_none());
    assert!(!root.is_deleted());
    assert!(!root.has_pending_events());
}

#[test]
fn test_with_id_keeps_identity() {
    let id = Uuid::new_v4();
    assert_eq!(AggregateRoot::<NoteEvent>::with_id(id).id(), id);
}

#[test]
fn test_mark_updated_keeps_created_at_le_updated_at() {
    let mut root = AggregateRoot::<NoteEvent>::new();
    let created = root.created_at();
    root.mark_updated();
    assert_eq!(root.created_at(), created);
    assert!(root.created_at() <= root.updated_at());
}

#[test]
fn test_mark_updated_never_moves_backwards() {
    let now = Utc::now();
    let future = now + Duration::hours(1);
    let mut root = AggregateRoot::<NoteEvent>::restore(Uuid::new_v4(), now, future, None);

    root.mark_updated();

    assert_eq!(root.updated_at(), future);
}

#[test]
fn test_mark_deleted_sets_both_timestamps() {
    let mut root = AggregateRoot::<NoteEvent>::new();
    root.mark_deleted();

    assert!(root.is_deleted());
    assert_eq!(root.deleted_at(), Some(root.updated_at()));
    assert!(root.created_at() <= root.updated_at());
}

#[test]
fn test_mark_deleted_is_idempotent() {
    let mut root = AggregateRoot::<NoteEvent>::new();
    root.mark_deleted();
    let first = root.deleted_at();
    let updated = root.updated_at();

    root.mark_deleted();

    assert_eq!(root.deleted_at(), first);
    assert_eq!(root.updated_at(), updated);
    assert!(root.is_deleted());
}

#[test]
fn test_deleted_at_survives_later_updates() {
    let mut root = AggregateRoot::<NoteEvent>::new();
    root.mark_deleted();
    let deleted = root.deleted_at();

    root.mark_updated();

    assert_eq!(root.deleted_at(), deleted);
    assert!(root.updated_at() >= deleted.unwrap());
}

#[test]
fn test_restore_clamps_inconsistent_timestamps() {
    let created = Utc::now();
    let earlier = created - Duration::minutes(5);
    let root = AggregateRoot::<NoteEvent>::restore(Uuid::new_v4(), created, earlier, None);
    assert_eq!(root.updated_at(), created);

    let deleted = created + Duration::minutes(10);
    let root = AggregateRoot::<NoteEvent>::restore(Uuid::new_v4(), created, created, Some(deleted));
    assert_eq!(root.updated_at(), deleted);
    assert!(root.is_deleted());
}

#[test]
fn test_pull_returns_insertion_order_then_empty() {
    let mut note = Note::new();
    note.add_domain_event(NoteEvent::Created(1));
    note.add_domain_event(NoteEvent::Edited(2));
    note.add_domain_event(NoteEvent::Edited(2));

    assert_eq!(
        note.pull_domain_events(),
        vec![NoteEvent::Created(1), NoteEvent::Edited(2), NoteEvent::Edited(2)]
    );
    assert!(note.pull_domain_events().is_empty());
}

#[test]
fn test_pulled_snapshot_is_independent_of_buffer() {
    let mut note = Note::new();
    note.add_domain_event(NoteEvent::Created(1));
    let snapshot = note.pull_domain_events();

    note.add_domain_event(NoteEvent::Edited(2));

    assert_eq!(snapshot, vec![NoteEvent::Created(1)]);
    assert_eq!(note.pull_domain_events(), vec![NoteEvent::Edited(2)]);
}

#[test]
fn test_clear_discards_events() {
    let mut note = Note::new();
    note.add_domain_event(NoteEvent::Created(1));
    note.clear_domain_events();
    assert!(note.pull_domain_events().is_empty());

    // Clearing and pulling an empty buffer are no-ops
    note.clear_domain_events();
    assert!(note.pull_domain_events().is_empty());
}

#[test]
fn test_publish_events_hook_is_overridable() {
    let mut note = Note::new();
    note.publish_events();
    assert_eq!(note.published, 1);
}

#[test]
fn test_serialization_skips_events() {
    let mut root = AggregateRoot::<NoteEvent>::new();
    root.add_domain_event(NoteEvent::Created(1));

    let json = serde_json::to_value(&root).unwrap();
    let object = json.as_object().unwrap();

    assert!(object.contains_key("createdAt"));
    assert!(object.contains_key("updatedAt"));
    assert!(object.contains_key("deletedAt"));
    assert!(!object.contains_key("events"));

    let restored: AggregateRoot<NoteEvent> = serde_json::from_value(json).unwrap();
    assert_eq!(restored.id(), root.id());
    assert!(!restored.has_pending_events());
}
