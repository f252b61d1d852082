//! Search criteria and page requests.

use crate::money::Money;
use crate::search::{AppliedFilters, Filter};
use serde::{Deserialize, Serialize};

/// Optional search criteria. Every field is an independent filter.
///
/// Empty strings are treated the same as `None`.
///
/// # Example
///
/// ```rust
/// use turbo_search::money::{Currency, Money};
/// use turbo_search::SearchCriteria;
///
/// let criteria = SearchCriteria::new()
///     .with_title("shoe")
///     .with_brand("acme")
///     .with_max_price(Money::from_decimal(80.0, Currency::EUR));
/// assert_eq!(criteria.filters().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub availability: Option<bool>,
    pub ean: Option<String>,
    pub mpn: Option<String>,
    pub shop: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl SearchCriteria {
    /// Criteria with no filters; matches the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_price(mut self, min: Money) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn with_max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Set both price bounds at once; `None` leaves a side open.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.availability = Some(available);
        self
    }

    pub fn with_ean(mut self, ean: impl Into<String>) -> Self {
        self.ean = Some(ean.into());
        self
    }

    pub fn with_mpn(mut self, mpn: impl Into<String>) -> Self {
        self.mpn = Some(mpn.into());
        self
    }

    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(shop.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// The present filters, in field declaration order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(title) = present(&self.title) {
            filters.push(Filter::Title(title.to_string()));
        }
        if let Some(brand) = present(&self.brand) {
            filters.push(Filter::Brand(brand.to_string()));
        }
        if let Some(category) = present(&self.category) {
            filters.push(Filter::Category(category.to_string()));
        }
        if let Some(min) = self.min_price {
            filters.push(Filter::MinPrice(min));
        }
        if let Some(max) = self.max_price {
            filters.push(Filter::MaxPrice(max));
        }
        if let Some(available) = self.availability {
            filters.push(Filter::Availability(available));
        }
        if let Some(ean) = present(&self.ean) {
            filters.push(Filter::Ean(ean.to_string()));
        }
        if let Some(mpn) = present(&self.mpn) {
            filters.push(Filter::Mpn(mpn.to_string()));
        }
        if let Some(shop) = present(&self.shop) {
            filters.push(Filter::Shop(shop.to_string()));
        }
        if let Some(color) = present(&self.color) {
            filters.push(Filter::Color(color.to_string()));
        }
        if let Some(size) = present(&self.size) {
            filters.push(Filter::Size(size.to_string()));
        }
        filters
    }

    /// Check if any filter is present.
    pub fn has_filters(&self) -> bool {
        !self.filters().is_empty()
    }

    /// The present filters as they are echoed back with results.
    pub fn applied_filters(&self) -> AppliedFilters {
        self.filters().iter().collect()
    }

    pub(crate) fn brand_needle(&self) -> Option<&str> {
        present(&self.brand)
    }

    pub(crate) fn category_needle(&self) -> Option<&str> {
        present(&self.category)
    }

    pub(crate) fn shop_needle(&self) -> Option<&str> {
        present(&self.shop)
    }

    pub(crate) fn color_needle(&self) -> Option<&str> {
        present(&self.color)
    }

    pub(crate) fn size_needle(&self) -> Option<&str> {
        present(&self.size)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// A validated, 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u32 = 50;
    pub const MAX_PER_PAGE: u32 = 100;

    /// Create a page request, clamping `page` to at least 1 and `per_page`
    /// to `1..=MAX_PER_PAGE`.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.clamp(1, u32::MAX as i64) as u32,
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE as i64) as u32,
        }
    }

    /// Lower the page size cap to `max` (at least 1).
    pub fn limit_per_page(self, max: u32) -> Self {
        Self {
            per_page: self.per_page.min(max.max(1)),
            ..self
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Calculate offset for SQL LIMIT/OFFSET.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}
