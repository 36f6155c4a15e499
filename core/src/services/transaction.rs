//! Delivery of buffered domain events around a persistence write.
//!
//! Aggregates only buffer events. Once the write that produced them has
//! been accepted by the persistence layer, [`TransactionCoordinator::commit`]
//! drains the buffer and forwards the events to an [`EventPublisher`]. When
//! the write is refused, [`TransactionCoordinator::rollback`] discards them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::aggregate::Aggregate;
use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::errors::DomainResult;

/// Sink for committed domain events (event bus, outbox, log...)
#[async_trait]
pub trait EventPublisher<E: DomainEvent>: Send + Sync {
    async fn publish(&self, events: Vec<EventEnvelope<E>>) -> DomainResult<()>;
}

pub struct TransactionCoordinator<P> {
    publisher: Arc<P>,
}

impl<P> Clone for TransactionCoordinator<P> {
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<P> TransactionCoordinator<P> {
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Drain `aggregate`'s events and publish them in insertion order.
    ///
    /// Returns the number of events handed to the publisher. The buffer is
    /// empty afterwards even if publishing fails.
    pub async fn commit<A>(&self, aggregate: &mut A) -> DomainResult<usize>
    where
        A: Aggregate + Send,
        P: EventPublisher<A::Event>,
    {
        let aggregate_id = aggregate.id();
        let envelopes: Vec<_> = aggregate
            .pull_domain_events()
            .into_iter()
            .map(|event| EventEnvelope::new(aggregate_id, A::AGGREGATE_TYPE, event))
            .collect();
        let count = envelopes.len();

        if count > 0 {
            tracing::debug!(
                aggregate_type = A::AGGREGATE_TYPE,
                aggregate_id = %aggregate_id,
                count,
                "publishing domain events"
            );
            self.publisher.publish(envelopes).await?;
        }

        aggregate.publish_events();
        Ok(count)
    }

    /// Discard `aggregate`'s buffered events. Returns how many were dropped.
    pub fn rollback<A>(&self, aggregate: &mut A) -> usize
    where
        A: Aggregate,
    {
        let dropped = aggregate.pending_events().len();
        aggregate.clear_domain_events();
        if dropped > 0 {
            tracing::debug!(
                aggregate_type = A::AGGREGATE_TYPE,
                aggregate_id = %aggregate.id(),
                dropped,
                "discarded domain events after failed write"
            );
        }
        dropped
    }
}
