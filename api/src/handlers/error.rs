//! Default error handler.
//!
//! Maps every [`DomainError`] to a status code and an [`ErrorResponse`]
//! body. Persistence errors that reach this point were not policy errors;
//! their messages stay in the server log.

use actix_web::{http::StatusCode, HttpResponse};
use std::collections::BTreeMap;

use ks_core::errors::DomainError;
use ks_shared::ErrorResponse;

use crate::dto::ErrorResponseExt;

/// Status code the default handler uses for `error`
pub fn domain_error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::Persistence(e) if e.is_unique_violation() => StatusCode::CONFLICT,
        DomainError::Internal { .. } | DomainError::Persistence(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Protocol body for `error`
pub fn domain_error_body(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Validation { message } => ErrorResponse::bad_request(message.clone()),
        DomainError::Unauthorized => ErrorResponse::unauthorized(),
        DomainError::Forbidden => ErrorResponse::forbidden(),
        DomainError::Persistence(e) if e.is_unique_violation() => {
            ErrorResponse::conflict("Resource already exists")
        }
        DomainError::Internal { .. } | DomainError::Persistence(_) => ErrorResponse::internal(),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn default_error_response(error: &DomainError) -> HttpResponse {
    let status = domain_error_status(error);
    // Persistence errors are logged by the policy translator.
    if error.as_persistence().is_none() {
        if status.is_server_error() {
            log::error!("Domain Error: {:?}", error);
        } else {
            log::warn!("Domain Error: {}", error);
        }
    }
    domain_error_body(error).to_response()
}

/// 400 response listing the failed fields of a request body or query
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    log::warn!("Request validation failed: {:?}", fields);
    ErrorResponse::bad_request("Request validation failed")
        .add_detail("fields", fields)
        .to_response()
}
