//! Pagination types
//!
//! The remote API reports totals through a `pageInfo` object on list
//! responses. Totals always come from there, never from counting rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page metadata as reported by list responses
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_rows: Option<u64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub is_first_page: Option<bool>,
    pub is_last_page: Option<bool>,
}

impl PageInfo {
    /// Extract `pageInfo` from a raw response.
    /// Missing or malformed metadata yields the empty default.
    pub fn from_response(response: &Value) -> Self {
        response
            .get("pageInfo")
            .and_then(|info| serde_json::from_value(info.clone()).ok())
            .unwrap_or_default()
    }

    /// Total row count, 0 when the deployment did not report one
    pub fn total(&self) -> u64 {
        self.total_rows.unwrap_or(0)
    }
}

/// Page request (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Offset of the first row on this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

/// One page of results together with the full result size
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            per_page: request.per_page,
            current_page: request.page,
        }
    }

    /// Number of items on this page
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn offset(&self) -> u64 {
        (self.current_page.max(1) - 1).saturating_mul(self.per_page)
    }

    pub fn last_page(&self) -> u64 {
        if self.per_page == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page).max(1)
        }
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
