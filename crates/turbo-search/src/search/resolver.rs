//! Resolves name and variant filters to catalog ids.

use tracing::debug;

use crate::context::OperationContext;
use crate::error::Result;
use crate::ids::{BrandId, CategoryId, ProductId, ShopId};
use crate::repository::CatalogRepository;
use crate::search::{SearchCriteria, VariantQuery};

/// Outcome of resolving one name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<Id> {
    /// The filter was not requested.
    Unfiltered,
    /// The filter was requested and nothing matched; no product can qualify.
    NoMatches,
    /// The filter was requested and these ids matched. Never empty.
    Matched(Vec<Id>),
}

impl<Id> Resolution<Id> {
    pub fn from_ids(ids: Vec<Id>) -> Self {
        if ids.is_empty() {
            Resolution::NoMatches
        } else {
            Resolution::Matched(ids)
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Resolution::Unfiltered)
    }

    fn describe(&self) -> String {
        match self {
            Resolution::Unfiltered => "unfiltered".to_string(),
            Resolution::NoMatches => "no matches".to_string(),
            Resolution::Matched(ids) => format!("{} matched", ids.len()),
        }
    }
}

impl<Id> Default for Resolution<Id> {
    fn default() -> Self {
        Resolution::Unfiltered
    }
}

/// Resolved id sets for every indirect filter of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub brand: Resolution<BrandId>,
    pub category: Resolution<CategoryId>,
    pub shop: Resolution<ShopId>,
    /// Products whose variants satisfy the color and size filters.
    pub variants: Resolution<ProductId>,
}

/// Resolve the brand, category, shop and variant filters of `criteria`.
///
/// Runs one store query per present filter, in that order.
pub async fn resolve<R>(repo: &R, ctx: &OperationContext, criteria: &SearchCriteria) -> Result<ResolvedFilters>
where
    R: CatalogRepository + ?Sized,
{
    let mut resolved = ResolvedFilters::default();

    if let Some(brand) = criteria.brand_needle() {
        let ids = ctx.step(repo.brand_ids_matching(brand)).await?;
        resolved.brand = Resolution::from_ids(ids);
    }
    if let Some(category) = criteria.category_needle() {
        let ids = ctx.step(repo.category_ids_matching(category)).await?;
        resolved.category = Resolution::from_ids(ids);
    }
    if let Some(shop) = criteria.shop_needle() {
        let ids = ctx.step(repo.shop_ids_matching(shop)).await?;
        resolved.shop = Resolution::from_ids(ids);
    }
    if let Some(query) = VariantQuery::new(criteria.color_needle(), criteria.size_needle()) {
        let ids = ctx.step(repo.variant_product_ids(&query)).await?;
        resolved.variants = Resolution::from_ids(ids);
    }

    debug!(
        brand = %resolved.brand.describe(),
        category = %resolved.category.describe(),
        shop = %resolved.shop.describe(),
        variants = %resolved.variants.describe(),
        "filters resolved"
    );
    Ok(resolved)
}
