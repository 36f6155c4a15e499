//! Domain events and the per-aggregate event buffer.

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use uuid::Uuid;

/// A named record of something that happened to an aggregate.
///
/// The core never interprets event contents; it only buffers them and hands
/// them to a publisher.
pub trait DomainEvent: Debug + Send + Sync + 'static {
    /// Stable, dotted event name such as `user.registered`
    fn event_name(&self) -> &'static str;

    /// When the event happened, if the event carries its own timestamp.
    /// Envelopes fall back to the time of publication.
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Append-only, drain-once queue of events owned by one aggregate instance.
#[derive(Debug)]
pub struct DomainEventBuffer<E> {
    events: Vec<E>,
}

impl<E> Default for DomainEventBuffer<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> DomainEventBuffer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, preserving insertion order. Never deduplicates.
    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Move every buffered event out, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Discard every buffered event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }
}

/// An event paired with the aggregate it came from, as handed to publishers.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope<E> {
    pub aggregate_id: Uuid,
    pub aggregate_type: &'static str,
    pub event_name: &'static str,
    pub recorded_at: DateTime<Utc>,
    pub payload: E,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(aggregate_id: Uuid, aggregate_type: &'static str, payload: E) -> Self {
        Self {
            aggregate_id,
            aggregate_type,
            event_name: payload.event_name(),
            recorded_at: payload.occurred_at().unwrap_or_else(Utc::now),
            payload,
        }
    }
}
