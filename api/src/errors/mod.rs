//! API error type returned by route handlers

pub mod policy;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use ks_core::errors::DomainError;

use crate::handlers::error::{
    default_error_response, domain_error_status, validation_error_response,
};

pub use policy::{PolicyErrorTranslator, Translation};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("request validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ApiError::Domain(error) => Some(error),
            ApiError::Validation(_) => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_error_status(error),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Default rendering. Persistence policy errors are rewritten later by
    /// [`PolicyErrorInterceptor`](crate::middleware::PolicyErrorInterceptor).
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => default_error_response(error),
            ApiError::Validation(errors) => validation_error_response(errors),
        }
    }
}
