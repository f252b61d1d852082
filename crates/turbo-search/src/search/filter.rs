//! Search filter types.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single requested search filter.
///
/// Name filters (brand, category, shop) and variant filters (color, size)
/// are plain text here; they are resolved to catalog ids before querying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Filter {
    /// Free text over title, description and search text.
    Title(String),
    /// Brand name substring.
    Brand(String),
    /// Category name or path substring.
    Category(String),
    /// Minimum price (inclusive).
    MinPrice(Money),
    /// Maximum price (inclusive).
    MaxPrice(Money),
    /// Exact availability.
    Availability(bool),
    /// Exact EAN.
    Ean(String),
    /// Exact manufacturer part number.
    Mpn(String),
    /// Shop name substring.
    Shop(String),
    /// Variant color substring.
    Color(String),
    /// Variant size substring.
    Size(String),
}

impl Filter {
    /// The criteria field name this filter comes from.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Title(_) => "title",
            Filter::Brand(_) => "brand",
            Filter::Category(_) => "category",
            Filter::MinPrice(_) => "min_price",
            Filter::MaxPrice(_) => "max_price",
            Filter::Availability(_) => "availability",
            Filter::Ean(_) => "ean",
            Filter::Mpn(_) => "mpn",
            Filter::Shop(_) => "shop",
            Filter::Color(_) => "color",
            Filter::Size(_) => "size",
        }
    }

    /// The value as the caller supplied it. Prices are decimal amounts.
    pub fn original_value(&self) -> serde_json::Value {
        match self {
            Filter::Title(s)
            | Filter::Brand(s)
            | Filter::Category(s)
            | Filter::Ean(s)
            | Filter::Mpn(s)
            | Filter::Shop(s)
            | Filter::Color(s)
            | Filter::Size(s) => serde_json::Value::String(s.clone()),
            Filter::MinPrice(m) | Filter::MaxPrice(m) => serde_json::json!(m.to_decimal()),
            Filter::Availability(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// Filters echoed back with a result set: field name to original value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedFilters(BTreeMap<String, serde_json::Value>);

impl AppliedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filter as applied.
    pub fn record(&mut self, filter: &Filter) {
        self.0.insert(filter.name().to_string(), filter.original_value());
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> FromIterator<&'a Filter> for AppliedFilters {
    fn from_iter<I: IntoIterator<Item = &'a Filter>>(iter: I) -> Self {
        let mut applied = AppliedFilters::new();
        for filter in iter {
            applied.record(filter);
        }
        applied
    }
}
