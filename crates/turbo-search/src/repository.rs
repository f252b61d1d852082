//! The catalog data-store collaborator.

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::Result;
use crate::ids::{BrandId, CategoryId, ProductId, ShopId};
use crate::search::{FacetCount, PageRequest, PriceStats, ProductFilter, VariantQuery};

/// Read access to the catalog.
///
/// Each method is one store round trip. Substring arguments are matched
/// case-insensitively and literally (no wildcard syntax). Implementations
/// must be safe to share between concurrent operations.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Ids of brands whose name contains `needle`.
    async fn brand_ids_matching(&self, needle: &str) -> Result<Vec<BrandId>>;

    /// Ids of categories whose name or path contains `needle`.
    async fn category_ids_matching(&self, needle: &str) -> Result<Vec<CategoryId>>;

    /// Ids of shops whose name contains `needle`.
    async fn shop_ids_matching(&self, needle: &str) -> Result<Vec<ShopId>>;

    /// Distinct ids of products meeting every condition of `query`.
    async fn variant_product_ids(&self, query: &VariantQuery) -> Result<Vec<ProductId>>;

    /// Number of products matching `filter`.
    async fn count_products(&self, filter: &ProductFilter) -> Result<u64>;

    /// One page of products matching `filter` with relations resolved.
    ///
    /// Ordered by availability (available first), then price ascending with
    /// unpriced products last, then id.
    async fn fetch_products(&self, filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>>;

    /// Titles containing `needle`, ordered by product id.
    async fn title_suggestions(&self, needle: &str, limit: u32) -> Result<Vec<String>>;

    /// Brand names containing `needle`, ordered by brand id.
    async fn brand_name_suggestions(&self, needle: &str, limit: u32) -> Result<Vec<String>>;

    /// Brand names with their product counts, largest first, ties by name.
    async fn brand_counts(&self, limit: u32) -> Result<Vec<FacetCount>>;

    /// Category names with their product counts, largest first, ties by name.
    async fn category_counts(&self, limit: u32) -> Result<Vec<FacetCount>>;

    /// Price statistics over priced products; `None` when none are priced.
    async fn price_stats(&self) -> Result<Option<PriceStats>>;

    /// Categories whose name contains `needle`, with product counts,
    /// largest first. Categories without products are left out.
    async fn categories_matching(&self, needle: &str, limit: u32) -> Result<Vec<FacetCount>>;
}
