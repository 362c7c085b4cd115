//! Shared response envelope types for API handlers.
//!
//! All API responses use the `{ "success": true, "data": ... }` envelope,
//! with `count` and `pagination` added on list endpoints. Use these types
//! instead of ad-hoc `serde_json::json!` so serialization stays consistent.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// List response envelope: `data` plus item `count` and a [`Pagination`]
/// block.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub pagination: Pagination,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count,
            pagination,
        }
    }
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pagination {
    /// Total matching rows across all pages.
    pub total: i64,
    /// Total number of pages.
    pub pages: i64,
    /// Current page (1-based).
    pub page: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<i64>,
}

impl Pagination {
    /// Build pagination metadata from a total row count and the requested
    /// page/limit.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        let prev = (page > 1).then(|| page - 1);
        let next = (page < pages).then(|| page + 1);
        Self {
            total,
            pages,
            page,
            limit,
            prev,
            next,
        }
    }
}
