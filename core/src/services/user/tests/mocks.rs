//! Mock implementations for testing user service and event delivery

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::errors::{DomainError, DomainResult};
use crate::services::transaction::EventPublisher;

/// Publisher that remembers the name of every event it receives
pub struct RecordingPublisher {
    pub published: Arc<Mutex<Vec<&'static str>>>,
    pub batches: Arc<Mutex<usize>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            batches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.published.lock().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        *self.batches.lock().unwrap()
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for RecordingPublisher {
    async fn publish(&self, events: Vec<EventEnvelope<E>>) -> DomainResult<()> {
        *self.batches.lock().unwrap() += 1;
        self.published
            .lock()
            .unwrap()
            .extend(events.iter().map(|envelope| envelope.event_name));
        Ok(())
    }
}

/// Publisher whose event bus is always down
pub struct FailingPublisher;

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for FailingPublisher {
    async fn publish(&self, _events: Vec<EventEnvelope<E>>) -> DomainResult<()> {
        Err(DomainError::Internal {
            message: "event bus unavailable".to_string(),
        })
    }
}
