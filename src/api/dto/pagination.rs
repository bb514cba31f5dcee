//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Default and maximum page size for link listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Offset/limit query parameters.
///
/// Uses `serde_with` to parse numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must not be negative"))]
    pub offset: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Returns `(offset, limit)` with defaults applied.
    ///
    /// # Defaults
    ///
    /// - `offset`: 0
    /// - `limit`: 100
    pub fn offset_limit(&self) -> (i64, i64) {
        (self.offset.unwrap_or(0), self.limit.unwrap_or(MAX_PAGE_SIZE))
    }
}
