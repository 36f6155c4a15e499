//! Pagination related types for list endpoints

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// Constants
pub const DEFAULT_LIMIT: u32 = 20;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_OFFSET: u64 = 0;

/// Rejection raised when a page request falls outside the accepted bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange { min: u32, max: u32, actual: u32 },
}

/// Bounded page request for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    /// Maximum number of items to return (1..=100)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Number of items to skip
    #[serde(default)]
    pub offset: u64,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl PaginationRequest {
    /// Create a page request, clamping the limit into the accepted range
    pub fn new(limit: u32, offset: u64) -> Self {
        Self {
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
            offset,
        }
    }

    /// Check the request against the accepted bounds without altering it
    pub fn validate(&self) -> Result<(), PaginationError> {
        if (MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            Ok(())
        } else {
            Err(PaginationError::LimitOutOfRange {
                min: MIN_LIMIT,
                max: MAX_LIMIT,
                actual: self.limit,
            })
        }
    }

    /// Select the window of `items` this request addresses.
    ///
    /// `items` is expected to be the full, already ordered result set; the
    /// returned slice is empty once the offset runs past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }

    /// Build the metadata for a page sliced with this request
    pub fn meta(&self, total: u64) -> PaginationMeta {
        create_pagination_meta(total, self.limit, self.offset)
    }
}

/// Metadata returned alongside a page of results.
///
/// `has_more` is always derived from the other three fields; there is no
/// way to construct or deserialize a value where it disagrees with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    total: u64,
    limit: u32,
    offset: u64,
    has_more: bool,
}

/// Compute pagination metadata.
///
/// Performs no validation of `limit` or `offset`; the binding layer bounds
/// them before this is reached.
pub fn create_pagination_meta(total: u64, limit: u32, offset: u64) -> PaginationMeta {
    PaginationMeta {
        total,
        limit,
        offset,
        has_more: offset.saturating_add(u64::from(limit)) < total,
    }
}

impl PaginationMeta {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }
}

impl<'de> Deserialize<'de> for PaginationMeta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Any incoming `hasMore` is ignored and recomputed.
        #[derive(Deserialize)]
        struct Raw {
            total: u64,
            limit: u32,
            offset: u64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(create_pagination_meta(raw.total, raw.limit, raw.offset))
    }
}

/// A page of results: `{ pagination: {...}, items: [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Metadata computed from the same request used to slice `items`
    pub pagination: PaginationMeta,

    /// The items in this page
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Pair a sliced result set with metadata computed from `request`
    pub fn new(items: Vec<T>, total: u64, request: &PaginationRequest) -> Self {
        Self {
            pagination: request.meta(total),
            items,
        }
    }

    /// Create an empty page
    pub fn empty(request: &PaginationRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            pagination: self.pagination,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items in this page
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
