use actix_web::HttpResponse;

use ks_shared::HealthResponse;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "keystone-api";

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
