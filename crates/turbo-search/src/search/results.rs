//! Search results and pagination.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::{AppliedFilters, PageRequest};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages; 0 when there are no items.
    pub total_pages: u64,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page as u64),
        }
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed), or 0 when the page is empty.
    pub fn start_item(&self) -> u64 {
        let start = (self.page as u64 - 1) * self.per_page as u64 + 1;
        if start > self.total {
            0
        } else {
            start
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (self.page as u64 * self.per_page as u64).min(self.total)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// Products on this page, in result order.
    pub products: Vec<Product>,
    /// Products matching the filters across all pages.
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
    /// Filters that were requested, with the values supplied.
    pub filters_applied: AppliedFilters,
    /// Wall time spent, in milliseconds with two decimals.
    pub execution_time_ms: f64,
}

impl SearchResults {
    pub fn new(products: Vec<Product>, total: u64, page: PageRequest, filters_applied: AppliedFilters) -> Self {
        let pagination = Pagination::new(page.page(), page.per_page(), total);
        Self {
            products,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages,
            filters_applied,
            execution_time_ms: 0.0,
        }
    }

    /// Create empty results for a page.
    pub fn empty(page: PageRequest, filters_applied: AppliedFilters) -> Self {
        Self::new(Vec::new(), 0, page, filters_applied)
    }

    /// Record the elapsed time, rounded to hundredths of a millisecond.
    pub fn with_execution_time(mut self, elapsed: Duration) -> Self {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.execution_time_ms = (ms * 100.0).round() / 100.0;
        self
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
