//! Error family raised by the policy-enforcing persistence layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discriminant carried by every persistence error.
///
/// Wire form: `rejected-by-policy`, `not-found`, or any other string the
/// persistence engine reports (kept verbatim in [`Other`](Self::Other)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PersistenceErrorReason {
    /// The acting principal failed a row or field policy
    RejectedByPolicy,
    /// The row does not exist or is invisible under the principal's policy
    NotFound,
    /// Anything else the engine reports
    Other(String),
}

impl PersistenceErrorReason {
    pub const REJECTED_BY_POLICY: &'static str = "rejected-by-policy";
    pub const NOT_FOUND: &'static str = "not-found";
    /// Reported when a write collides with a unique constraint. Carried as
    /// [`Other`](Self::Other); only the HTTP layer gives it a status of its own.
    pub const UNIQUE_VIOLATION: &'static str = "unique-violation";

    pub fn as_str(&self) -> &str {
        match self {
            Self::RejectedByPolicy => Self::REJECTED_BY_POLICY,
            Self::NotFound => Self::NOT_FOUND,
            Self::Other(reason) => reason,
        }
    }
}

impl From<&str> for PersistenceErrorReason {
    fn from(reason: &str) -> Self {
        match reason {
            Self::REJECTED_BY_POLICY => Self::RejectedByPolicy,
            Self::NOT_FOUND => Self::NotFound,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PersistenceErrorReason {
    fn from(reason: String) -> Self {
        match reason.as_str() {
            Self::REJECTED_BY_POLICY => Self::RejectedByPolicy,
            Self::NOT_FOUND => Self::NotFound,
            _ => Self::Other(reason),
        }
    }
}

impl From<PersistenceErrorReason> for String {
    fn from(reason: PersistenceErrorReason) -> Self {
        match reason {
            PersistenceErrorReason::Other(reason) => reason,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PersistenceErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error surfaced by the persistence engine.
///
/// `message` may describe which policy or field triggered a rejection; it is
/// meant for server logs and must not reach clients.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}: {message}")]
pub struct PersistenceError {
    pub reason: PersistenceErrorReason,
    #[serde(default)]
    pub message: String,
}

impl PersistenceError {
    pub fn new(reason: impl Into<PersistenceErrorReason>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }

    pub fn rejected_by_policy(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorReason::RejectedByPolicy, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorReason::NotFound, message)
    }

    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorReason::UNIQUE_VIOLATION, message)
    }

    pub fn is_unique_violation(&self) -> bool {
        self.reason.as_str() == PersistenceErrorReason::UNIQUE_VIOLATION
    }

    pub fn is_policy_rejection(&self) -> bool {
        self.reason == PersistenceErrorReason::RejectedByPolicy
    }

    pub fn is_not_found(&self) -> bool {
        self.reason == PersistenceErrorReason::NotFound
    }
}
