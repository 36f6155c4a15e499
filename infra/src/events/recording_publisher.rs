use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use ks_core::domain::{DomainEvent, EventEnvelope};
use ks_core::errors::DomainResult;
use ks_core::services::EventPublisher;

/// Publisher that keeps every envelope it receives.
///
/// Cloning shares the same log, so a handle kept by the caller sees what
/// the service published.
#[derive(Debug)]
pub struct RecordingEventPublisher<E> {
    published: Arc<RwLock<Vec<EventEnvelope<E>>>>,
}

impl<E> Clone for RecordingEventPublisher<E> {
    fn clone(&self) -> Self {
        Self {
            published: Arc::clone(&self.published),
        }
    }
}

impl<E> Default for RecordingEventPublisher<E> {
    fn default() -> Self {
        Self {
            published: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<E: DomainEvent> RecordingEventPublisher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all published events, oldest first
    pub async fn event_names(&self) -> Vec<&'static str> {
        self.published
            .read()
            .await
            .iter()
            .map(|envelope| envelope.event_name)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.published.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.published.read().await.is_empty()
    }

    /// Remove and return everything recorded so far
    pub async fn take(&self) -> Vec<EventEnvelope<E>> {
        std::mem::take(&mut *self.published.write().await)
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for RecordingEventPublisher<E> {
    async fn publish(&self, events: Vec<EventEnvelope<E>>) -> DomainResult<()> {
        self.published.write().await.extend(events);
        Ok(())
    }
}
