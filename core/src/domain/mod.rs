//! Domain layer containing the aggregate root, domain events and entities.

pub mod aggregate;
pub mod entities;
pub mod events;

// Re-export commonly used domain types
pub use aggregate::{Aggregate, AggregateRoot};
pub use entities::*;
pub use events::{DomainEvent, DomainEventBuffer, EventEnvelope};

#[cfg(test)]
mod tests;
