use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel for "no such page" in `prev_page`, `next_page` and, for an empty
/// table, `last_page`.
pub const NO_PAGE: i64 = -1;

/// Query string accepted by every list and search endpoint.
///
/// Both fields are kept as raw strings: a missing or malformed `page` falls
/// back to the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub q: Option<String>,
}

impl PageQuery {
    pub fn requested_page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(i64),
    #[error("total rows must not be negative, got {0}")]
    NegativeTotal(i64),
}

/// Row window for a `LIMIT/OFFSET` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// Clamped page position plus navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub prev_page: i64,
    pub page: i64,
    pub next_page: i64,
    pub last_page: i64,
    pub total: i64,
}

impl PageResult {
    /// True when the count query found nothing. `page` is still 0 here even
    /// though `last_page` is -1.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Window to load for this page, or `None` when there are no rows at all.
    pub fn window(&self, page_size: i64) -> Option<Window> {
        if self.is_empty() {
            return None;
        }
        Some(Window {
            offset: self.page * page_size,
            limit: page_size,
        })
    }

    pub fn with_data<T>(self, data: Vec<T>) -> Paginated<T> {
        Paginated { data, page: self }
    }
}

/// Response envelope for paginated endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub page: PageResult,
}
