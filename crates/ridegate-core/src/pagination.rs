//! Pagination metadata for list responses.
//!
//! Lists are page-based: `skip = (page - 1) * limit`, and the response carries
//! enough metadata for a client to render a pager without a second request.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "success": true,
//!   "data": [...],
//!   "pagination": {
//!     "total": 25,
//!     "page": 3,
//!     "limit": 10,
//!     "totalPages": 3,
//!     "hasMore": false
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default page number when `page` is absent.
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when `limit` is absent.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of matching items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    /// Maximum items per page
    pub limit: i64,
    /// `ceil(total / limit)`
    pub total_pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the metadata for `page` of a result set of `total` items.
    ///
    /// `page` and `limit` are expected to be validated (≥ 1) by the caller.
    #[must_use]
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let limit = limit.max(1);
        let skip = skip_for(page, limit);

        Self {
            total,
            page,
            limit,
            total_pages: total / limit + i64::from(total % limit != 0),
            has_more: skip.saturating_add(limit) < total,
        }
    }
}

/// Number of records to skip for a 1-indexed page, or `None` when the offset
/// does not fit in an `i64`.
#[must_use]
pub fn checked_skip(page: i64, limit: i64) -> Option<i64> {
    (page.max(1) - 1).checked_mul(limit)
}

/// Number of records to skip for a 1-indexed page. Saturates at `i64::MAX`.
#[must_use]
pub fn skip_for(page: i64, limit: i64) -> i64 {
    checked_skip(page, limit).unwrap_or(i64::MAX)
}
