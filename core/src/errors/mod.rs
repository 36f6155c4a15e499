//! Domain-specific error types and error handling.

mod persistence;

pub use persistence::{PersistenceError, PersistenceErrorReason};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the persistence error family
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl DomainError {
    /// The persistence error behind this one, if any
    pub fn as_persistence(&self) -> Option<&PersistenceError> {
        match self {
            DomainError::Persistence(error) => Some(error),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
