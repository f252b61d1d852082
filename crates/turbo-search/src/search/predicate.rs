//! Typed product predicates.
//!
//! A [`ProductFilter`] is a conjunction of [`ProductPredicate`] clauses over
//! product rows. Repositories translate it into their own query language.

use crate::ids::{BrandId, CategoryId, ProductId, ShopId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One clause of a product filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductPredicate {
    /// Case-insensitive containment over title, description or search text.
    TextContains(String),
    BrandIn(Vec<BrandId>),
    CategoryIn(Vec<CategoryId>),
    ShopIn(Vec<ShopId>),
    /// Product id membership (from variant matching).
    IdIn(Vec<ProductId>),
    /// Price at or above the bound. Unpriced products never match.
    PriceAtLeast(Money),
    /// Price at or below the bound. Unpriced products never match.
    PriceAtMost(Money),
    Availability(bool),
    Ean(String),
    Mpn(String),
    /// Matches no product.
    Nothing,
}

impl ProductPredicate {
    /// Whether this clause can match no product without consulting the store.
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            ProductPredicate::Nothing => true,
            ProductPredicate::BrandIn(ids) => ids.is_empty(),
            ProductPredicate::CategoryIn(ids) => ids.is_empty(),
            ProductPredicate::ShopIn(ids) => ids.is_empty(),
            ProductPredicate::IdIn(ids) => ids.is_empty(),
            _ => false,
        }
    }
}

/// A conjunction of product predicates. Empty matches every product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    clauses: Vec<ProductPredicate>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause, builder style.
    pub fn and(mut self, predicate: ProductPredicate) -> Self {
        self.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: ProductPredicate) {
        self.clauses.push(predicate);
    }

    pub fn clauses(&self) -> &[ProductPredicate] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when some clause can never match, so the filter selects nothing.
    pub fn is_unsatisfiable(&self) -> bool {
        self.clauses.iter().any(ProductPredicate::is_unsatisfiable)
    }
}

/// Variant attribute conditions. Each present condition is checked against
/// variant rows on its own; a product qualifies when every condition is met
/// by at least one of its variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantQuery {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl VariantQuery {
    pub fn new(color: Option<&str>, size: Option<&str>) -> Option<Self> {
        if color.is_none() && size.is_none() {
            return None;
        }
        Some(Self {
            color: color.map(str::to_string),
            size: size.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::new();
        assert!(filter.is_empty());
        assert!(!filter.is_unsatisfiable());
    }

    #[test]
    fn test_nothing_makes_filter_unsatisfiable() {
        let filter = ProductFilter::new()
            .and(ProductPredicate::Availability(true))
            .and(ProductPredicate::Nothing);
        assert!(filter.is_unsatisfiable());
        assert_eq!(filter.clauses().len(), 2);
    }

    #[test]
    fn test_empty_id_set_is_unsatisfiable() {
        assert!(ProductPredicate::BrandIn(vec![]).is_unsatisfiable());
        assert!(!ProductPredicate::BrandIn(vec![BrandId::new(1)]).is_unsatisfiable());
        assert!(!ProductPredicate::PriceAtMost(Money::new(0, Currency::EUR)).is_unsatisfiable());
    }

    #[test]
    fn test_variant_query_requires_a_condition() {
        assert_eq!(VariantQuery::new(None, None), None);
        let query = VariantQuery::new(Some("red"), None).unwrap();
        assert_eq!(query.color.as_deref(), Some("red"));
        assert_eq!(query.size, None);
    }
}
