//! Translation of persistence policy errors into protocol responses.
//!
//! The persistence layer reports refused writes as `rejected-by-policy` and
//! hidden or missing rows as `not-found`. Both become fixed response bodies
//! that never echo the persistence message; everything else is left to the
//! default error handler.

use actix_web::HttpResponse;

use ks_core::errors::{PersistenceError, PersistenceErrorReason};
use ks_shared::ErrorResponse;

use crate::dto::ErrorResponseExt;

/// Outcome of translating one persistence error
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Forbidden(ErrorResponse),
    NotFound(ErrorResponse),
    /// Not a policy error; hand it to the default handler unchanged
    Delegate,
}

impl Translation {
    /// Protocol response for a translated error
    pub fn into_response(self) -> Option<HttpResponse> {
        match self {
            Translation::Forbidden(body) | Translation::NotFound(body) => Some(body.to_response()),
            Translation::Delegate => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyErrorTranslator {
    /// Report policy rejections as not-found so callers cannot tell a row
    /// they may not touch from one that does not exist
    collapse_not_found: bool,
}

impl PolicyErrorTranslator {
    pub fn new(collapse_not_found: bool) -> Self {
        Self { collapse_not_found }
    }

    pub fn collapses_not_found(&self) -> bool {
        self.collapse_not_found
    }

    pub fn translate(&self, error: &PersistenceError) -> Translation {
        let translation = match &error.reason {
            PersistenceErrorReason::RejectedByPolicy if self.collapse_not_found => {
                Translation::NotFound(ErrorResponse::not_found())
            }
            PersistenceErrorReason::RejectedByPolicy => {
                Translation::Forbidden(ErrorResponse::forbidden())
            }
            PersistenceErrorReason::NotFound => Translation::NotFound(ErrorResponse::not_found()),
            PersistenceErrorReason::Other(_) => Translation::Delegate,
        };

        match &translation {
            Translation::Delegate => {
                log::error!("Unhandled persistence error, delegating: {}", error)
            }
            _ => log::warn!("Persistence policy error: {}", error),
        }
        translation
    }
}
