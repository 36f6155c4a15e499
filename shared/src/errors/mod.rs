//! Shared error response structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error body used across all API endpoints:
/// `{ "statusCode": 403, "message": "Forbidden", "error": "Forbidden" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code echoed in the body
    pub status_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Short status phrase for client identification
    pub error: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            error: error.into(),
            details: None,
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, error_phrases::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, error_phrases::UNAUTHORIZED, error_phrases::UNAUTHORIZED)
    }

    pub fn forbidden() -> Self {
        Self::new(403, error_phrases::FORBIDDEN, error_phrases::FORBIDDEN)
    }

    pub fn not_found() -> Self {
        Self::new(404, error_phrases::NOT_FOUND, error_phrases::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, error_phrases::CONFLICT, message)
    }

    pub fn internal() -> Self {
        Self::new(
            500,
            error_phrases::INTERNAL_SERVER_ERROR,
            error_phrases::INTERNAL_SERVER_ERROR,
        )
    }
}

/// Status phrases used in the `error` field
pub mod error_phrases {
    pub const BAD_REQUEST: &str = "Bad Request";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const FORBIDDEN: &str = "Forbidden";
    pub const NOT_FOUND: &str = "Not Found";
    pub const CONFLICT: &str = "Conflict";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::forbidden()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"statusCode": 403, "message": "Forbidden", "error": "Forbidden"})
        );
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::bad_request("limit out of range").add_detail("field", "limit");
        let details = response.details.unwrap();
        assert_eq!(details["field"], serde_json::json!("limit"));
    }
}
