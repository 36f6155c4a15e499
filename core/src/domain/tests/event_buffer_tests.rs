//! Unit tests for the domain event buffer

use crate::domain::events::{DomainEvent, DomainEventBuffer, EventEnvelope};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
struct Ping(u8);

impl DomainEvent for Ping {
    fn event_name(&self) -> &'static str {
        "ping"
    }
}

#[test]
fn test_buffer_push_and_drain() {
    let mut buffer = DomainEventBuffer::new();
    buffer.push(Ping(1));
    buffer.push(Ping(1));
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.as_slice(), &[Ping(1), Ping(1)]);

    assert_eq!(buffer.drain(), vec![Ping(1), Ping(1)]);
    assert!(buffer.is_empty());
    assert!(buffer.drain().is_empty());
}

#[test]
fn test_buffer_clear_on_empty_is_noop() {
    let mut buffer: DomainEventBuffer<Ping> = DomainEventBuffer::default();
    buffer.clear();
    assert!(buffer.is_empty());
}

#[test]
fn test_envelope_takes_event_name() {
    let id = Uuid::new_v4();
    let envelope = EventEnvelope::new(id, "probe", Ping(7));
    assert_eq!(envelope.aggregate_id, id);
    assert_eq!(envelope.aggregate_type, "probe");
    assert_eq!(envelope.event_name, "ping");
    assert_eq!(envelope.payload, Ping(7));
}

#[derive(Debug)]
struct Stamped(chrono::DateTime<chrono::Utc>);

impl DomainEvent for Stamped {
    fn event_name(&self) -> &'static str {
        "stamped"
    }

    fn occurred_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        Some(self.0)
    }
}

#[test]
fn test_envelope_prefers_event_timestamp() {
    let at = chrono::Utc::now() - chrono::Duration::hours(1);
    let envelope = EventEnvelope::new(Uuid::new_v4(), "probe", Stamped(at));
    assert_eq!(envelope.recorded_at, at);
}
