//! Facet aggregation: brand and category counts plus price buckets.

use serde::{Deserialize, Serialize};

use crate::context::OperationContext;
use crate::error::Result;
use crate::money::Money;
use crate::repository::CatalogRepository;

/// A named group with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: i64,
}

impl FacetCount {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// A price bucket, e.g. `{"range": "0-29", "label": "Under €29"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub range: String,
    pub label: String,
}

/// Minimum, mean and maximum over priced products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: Money,
    pub avg: Money,
    pub max: Money,
}

/// Facet summary of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub brands: Vec<FacetCount>,
    pub categories: Vec<FacetCount>,
    /// Absent (not empty) when no product has a price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<Vec<PriceRange>>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.categories.is_empty() && self.price_ranges.is_none()
    }
}

/// Three buckets split at the average and maximum price, in whole units.
pub fn price_ranges(stats: &PriceStats) -> Vec<PriceRange> {
    let avg = stats.avg.whole_units();
    let max = stats.max.whole_units();
    let avg_label = stats.avg.display_whole();
    let max_label = stats.max.display_whole();

    vec![
        PriceRange {
            range: format!("0-{}", avg),
            label: format!("Under {}", avg_label),
        },
        PriceRange {
            range: format!("{}-{}", avg, max),
            label: format!("{} - {}", avg_label, max_label),
        },
        PriceRange {
            range: format!("{}+", max),
            label: format!("Over {}", max_label),
        },
    ]
}

/// Aggregate facets over the whole catalog.
///
/// Three sequential store queries: brand counts, category counts, price
/// statistics.
pub async fn aggregate<R>(repo: &R, ctx: &OperationContext, limit: u32) -> Result<Facets>
where
    R: CatalogRepository + ?Sized,
{
    let brands = ctx.step(repo.brand_counts(limit)).await?;
    let categories = ctx.step(repo.category_counts(limit)).await?;
    let stats = ctx.step(repo.price_stats()).await?;

    Ok(Facets {
        brands,
        categories,
        price_ranges: stats.as_ref().map(price_ranges),
    })
}
