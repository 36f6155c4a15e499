//! Aggregate root: identity, lifecycle timestamps, soft deletion and the
//! domain-event buffer shared by every persisted entity.
//!
//! Entities embed an [`AggregateRoot`] and implement [`Aggregate`] to expose
//! it; the provided trait methods are the only way entity behaviour should
//! touch timestamps or events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::events::{DomainEvent, DomainEventBuffer};

/// Base state carried by every aggregate.
///
/// Invariants:
/// - `created_at <= updated_at`
/// - once `deleted_at` is set it never changes, and `updated_at` equals it at
///   the moment of deletion
/// - the event buffer is owned by this instance and is never serialized
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct AggregateRoot<E> {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: DomainEventBuffer<E>,
}

impl<E> Default for AggregateRoot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> AggregateRoot<E> {
    /// State for a brand new aggregate with a generated identity
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// State for a new aggregate with a caller-supplied identity
    pub fn with_id(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            events: DomainEventBuffer::new(),
        }
    }

    /// Rebuild state loaded from storage.
    ///
    /// `updated_at` is raised to `created_at` (and to `deleted_at`, when
    /// present) if the stored values disagree with the invariants.
    pub fn restore(
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut updated_at = updated_at.max(created_at);
        if let Some(deleted_at) = deleted_at {
            updated_at = updated_at.max(deleted_at);
        }
        Self {
            id,
            created_at,
            updated_at,
            deleted_at,
            events: DomainEventBuffer::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Advance `updated_at` to now. Never moves it backwards.
    pub fn mark_updated(&mut self) {
        self.updated_at = self.next_timestamp();
    }

    /// Soft delete. A second call is a no-op and keeps the first timestamp.
    pub fn mark_deleted(&mut self) {
        if self.is_deleted() {
            return;
        }
        let now = self.next_timestamp();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn add_domain_event(&mut self, event: E) {
        self.events.push(event);
    }

    /// Take every buffered event in insertion order, leaving the buffer empty.
    pub fn pull_domain_events(&mut self) -> Vec<E> {
        self.events.drain()
    }

    pub fn clear_domain_events(&mut self) {
        self.events.clear();
    }

    pub fn pending_events(&self) -> &[E] {
        self.events.as_slice()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        Utc::now().max(self.updated_at)
    }
}

impl<'de, E> Deserialize<'de> for AggregateRoot<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Stored {
            id: Uuid,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            #[serde(default)]
            deleted_at: Option<DateTime<Utc>>,
        }

        let stored = Stored::deserialize(deserializer)?;
        Ok(Self::restore(
            stored.id,
            stored.created_at,
            stored.updated_at,
            stored.deleted_at,
        ))
    }
}

/// Implemented by every entity that embeds an [`AggregateRoot`].
pub trait Aggregate {
    type Event: DomainEvent;

    /// Name used when tagging published events, e.g. `"user"`
    const AGGREGATE_TYPE: &'static str;

    fn root(&self) -> &AggregateRoot<Self::Event>;

    fn root_mut(&mut self) -> &mut AggregateRoot<Self::Event>;

    fn id(&self) -> Uuid {
        self.root().id()
    }

    fn is_deleted(&self) -> bool {
        self.root().is_deleted()
    }

    fn mark_updated(&mut self) {
        self.root_mut().mark_updated();
    }

    fn mark_deleted(&mut self) {
        self.root_mut().mark_deleted();
    }

    fn add_domain_event(&mut self, event: Self::Event) {
        self.root_mut().add_domain_event(event);
    }

    fn pull_domain_events(&mut self) -> Vec<Self::Event> {
        self.root_mut().pull_domain_events()
    }

    fn clear_domain_events(&mut self) {
        self.root_mut().clear_domain_events();
    }

    fn pending_events(&self) -> &[Self::Event] {
        self.root().pending_events()
    }

    /// Hook run after the transaction coordinator has delivered this
    /// aggregate's events. Does nothing unless an entity overrides it.
    fn publish_events(&mut self) {}
}
