//! Shared utilities and common types for Keystone server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Pagination contract and page envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LoggingConfig, PolicyConfig,
    ServerConfig,
};
pub use errors::{error_phrases, ErrorResponse, IntoErrorResponse};
pub use types::{
    create_pagination_meta, HealthResponse, HealthStatus, Page, PaginationError, PaginationMeta,
    PaginationRequest,
};
