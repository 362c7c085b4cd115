//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
const DEFAULT_LIMIT: i64 = 20;
/// Hard cap on page size.
const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?page=&limit=`), 1-based.
///
/// Used by every paginated list endpoint. Values are clamped via
/// [`PageParams::clamped`] before touching the repository layer.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Resolve to a concrete `(page, limit, offset)` triple with defaults
    /// applied and out-of-range values clamped.
    pub fn clamped(self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1) * limit;
        (page, limit, offset)
    }
}
