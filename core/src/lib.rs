//! # Keystone Core
//!
//! Domain layer for the Keystone backend: the aggregate root every persisted
//! entity builds on, domain-event buffering and delivery, the authenticated
//! principal and declarative authorization metadata, and the error family
//! raised by the policy-enforcing persistence layer.

pub mod auth;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use auth::{
    authorize, AuthenticatedUser, AuthorizationDecision, AuthorizationRegistry, RouteAuth,
};
pub use domain::{
    Aggregate, AggregateRoot, DomainEvent, DomainEventBuffer, EventEnvelope, User, UserEvent,
    UserRecord,
};
pub use errors::{DomainError, DomainResult, PersistenceError, PersistenceErrorReason};
pub use repositories::UserRepository;
pub use services::{EventPublisher, TransactionCoordinator, UserService};
