//! Type definitions module with domain-specific sub-modules
//!
//! This module organizes types into logical categories:
//! - `pagination` - Page requests, page metadata and page envelopes
//! - `health` - Liveness payload

pub mod health;
pub mod pagination;

// Re-export commonly used types at module level
pub use pagination::{
    create_pagination_meta, Page, PaginationError, PaginationMeta, PaginationRequest,
    DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT,
};
pub use health::{HealthResponse, HealthStatus};
