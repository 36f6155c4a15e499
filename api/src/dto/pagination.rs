use serde::Deserialize;
use validator::Validate;

use ks_shared::types::pagination::{DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT, MIN_LIMIT};
use ks_shared::PaginationRequest;

/// `?limit=&offset=` query parameters.
///
/// Out-of-range values are rejected rather than clamped.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct PaginationQuery {
    #[validate(range(min = MIN_LIMIT, max = MAX_LIMIT))]
    pub limit: Option<u32>,

    pub offset: Option<u64>,
}

impl PaginationQuery {
    /// Validate and convert into a [`PaginationRequest`]
    pub fn into_request(self) -> Result<PaginationRequest, validator::ValidationErrors> {
        self.validate()?;
        Ok(PaginationRequest {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(DEFAULT_OFFSET),
        })
    }
}
