//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::money::Currency;
use crate::search::PageRequest;

/// Tunables for [`SearchService`](crate::SearchService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size when the caller gives none.
    pub default_per_page: u32,
    /// Largest page size a caller may request, at most
    /// [`PageRequest::MAX_PER_PAGE`].
    pub max_per_page: u32,
    /// Entries per facet list.
    pub facet_limit: u32,
    /// Suggestions returned when the caller gives no limit.
    pub suggestion_limit: u32,
    /// Categories returned by category search when the caller gives no limit.
    pub category_limit: u32,
    /// Currency of stored prices.
    pub currency: Currency,
    /// Deadline applied to every operation, in milliseconds. 0 disables it.
    pub query_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_per_page: PageRequest::DEFAULT_PER_PAGE,
            max_per_page: PageRequest::MAX_PER_PAGE,
            facet_limit: 20,
            suggestion_limit: 10,
            category_limit: 10,
            currency: Currency::EUR,
            query_timeout_ms: 0,
        }
    }
}

impl SearchConfig {
    /// The per-operation deadline, if one is configured.
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_ms > 0).then(|| Duration::from_millis(self.query_timeout_ms))
    }

    /// The page request used when the caller asks for a page but no size.
    pub fn page(&self, page: i64) -> PageRequest {
        PageRequest::new(page, self.default_per_page as i64).limit_per_page(self.max_per_page)
    }

    /// Check that limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_per_page == 0 || self.max_per_page > PageRequest::MAX_PER_PAGE {
            return Err(SearchError::ConfigError(format!(
                "max_per_page must be between 1 and {}",
                PageRequest::MAX_PER_PAGE
            )));
        }
        if self.default_per_page == 0 || self.default_per_page > self.max_per_page {
            return Err(SearchError::ConfigError(format!(
                "default_per_page must be between 1 and max_per_page ({})",
                self.max_per_page
            )));
        }
        if self.facet_limit == 0 {
            return Err(SearchError::ConfigError("facet_limit must be at least 1".into()));
        }
        Ok(())
    }
}
