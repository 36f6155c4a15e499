use async_trait::async_trait;
use tracing::info;

use ks_core::domain::{DomainEvent, EventEnvelope};
use ks_core::errors::DomainResult;
use ks_core::services::EventPublisher;

/// Publisher that writes every committed event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for TracingEventPublisher {
    async fn publish(&self, events: Vec<EventEnvelope<E>>) -> DomainResult<()> {
        for envelope in &events {
            info!(
                aggregate_type = envelope.aggregate_type,
                aggregate_id = %envelope.aggregate_id,
                event = envelope.event_name,
                recorded_at = %envelope.recorded_at,
                payload = ?envelope.payload,
                "domain event published"
            );
        }
        Ok(())
    }
}
