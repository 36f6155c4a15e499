use actix_web::{http::StatusCode, HttpResponse};
pub use ks_shared::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    /// Respond with this body, using its `statusCode` as the HTTP status
    fn to_response(&self) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
