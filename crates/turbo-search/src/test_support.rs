//! Repository doubles for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::{Result, SearchError};
use crate::ids::{BrandId, CategoryId, ProductId, ShopId};
use crate::repository::CatalogRepository;
use crate::search::{FacetCount, PageRequest, PriceStats, ProductFilter, VariantQuery};

/// Returns canned data and records which methods were called.
#[derive(Debug, Default)]
pub struct StubRepository {
    pub brand_ids: Vec<BrandId>,
    pub category_ids: Vec<CategoryId>,
    pub shop_ids: Vec<ShopId>,
    pub variant_ids: Vec<ProductId>,
    pub total: u64,
    pub products: Vec<Product>,
    pub titles: Vec<String>,
    pub brand_names: Vec<String>,
    pub brand_counts: Vec<FacetCount>,
    pub category_counts: Vec<FacetCount>,
    pub price_stats: Option<PriceStats>,
    pub categories: Vec<FacetCount>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
}

impl StubRepository {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

fn first<T: Clone>(items: &[T], limit: u32) -> Vec<T> {
    items.iter().take(limit as usize).cloned().collect()
}

#[async_trait]
impl CatalogRepository for StubRepository {
    async fn brand_ids_matching(&self, _needle: &str) -> Result<Vec<BrandId>> {
        self.record("brand_ids_matching");
        Ok(self.brand_ids.clone())
    }

    async fn category_ids_matching(&self, _needle: &str) -> Result<Vec<CategoryId>> {
        self.record("category_ids_matching");
        Ok(self.category_ids.clone())
    }

    async fn shop_ids_matching(&self, _needle: &str) -> Result<Vec<ShopId>> {
        self.record("shop_ids_matching");
        Ok(self.shop_ids.clone())
    }

    async fn variant_product_ids(&self, _query: &VariantQuery) -> Result<Vec<ProductId>> {
        self.record("variant_product_ids");
        Ok(self.variant_ids.clone())
    }

    async fn count_products(&self, _filter: &ProductFilter) -> Result<u64> {
        self.record("count_products");
        Ok(self.total)
    }

    async fn fetch_products(&self, _filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>> {
        self.record("fetch_products");
        Ok(first(&self.products, page.per_page()))
    }

    async fn title_suggestions(&self, _needle: &str, limit: u32) -> Result<Vec<String>> {
        self.record("title_suggestions");
        Ok(first(&self.titles, limit))
    }

    async fn brand_name_suggestions(&self, _needle: &str, limit: u32) -> Result<Vec<String>> {
        self.record("brand_name_suggestions");
        Ok(first(&self.brand_names, limit))
    }

    async fn brand_counts(&self, limit: u32) -> Result<Vec<FacetCount>> {
        self.record("brand_counts");
        Ok(first(&self.brand_counts, limit))
    }

    async fn category_counts(&self, limit: u32) -> Result<Vec<FacetCount>> {
        self.record("category_counts");
        Ok(first(&self.category_counts, limit))
    }

    async fn price_stats(&self) -> Result<Option<PriceStats>> {
        self.record("price_stats");
        Ok(self.price_stats)
    }

    async fn categories_matching(&self, _needle: &str, limit: u32) -> Result<Vec<FacetCount>> {
        self.record("categories_matching");
        Ok(first(&self.categories, limit))
    }
}

/// Fails every call as a lost connection would.
#[derive(Debug, Clone, Copy)]
pub struct FailingRepository;

fn lost<T>() -> Result<T> {
    Err(SearchError::DatabaseError("connection lost".into()))
}

#[async_trait]
impl CatalogRepository for FailingRepository {
    async fn brand_ids_matching(&self, _needle: &str) -> Result<Vec<BrandId>> {
        lost()
    }

    async fn category_ids_matching(&self, _needle: &str) -> Result<Vec<CategoryId>> {
        lost()
    }

    async fn shop_ids_matching(&self, _needle: &str) -> Result<Vec<ShopId>> {
        lost()
    }

    async fn variant_product_ids(&self, _query: &VariantQuery) -> Result<Vec<ProductId>> {
        lost()
    }

    async fn count_products(&self, _filter: &ProductFilter) -> Result<u64> {
        lost()
    }

    async fn fetch_products(&self, _filter: &ProductFilter, _page: PageRequest) -> Result<Vec<Product>> {
        lost()
    }

    async fn title_suggestions(&self, _needle: &str, _limit: u32) -> Result<Vec<String>> {
        lost()
    }

    async fn brand_name_suggestions(&self, _needle: &str, _limit: u32) -> Result<Vec<String>> {
        lost()
    }

    async fn brand_counts(&self, _limit: u32) -> Result<Vec<FacetCount>> {
        lost()
    }

    async fn category_counts(&self, _limit: u32) -> Result<Vec<FacetCount>> {
        lost()
    }

    async fn price_stats(&self) -> Result<Option<PriceStats>> {
        lost()
    }

    async fn categories_matching(&self, _needle: &str, _limit: u32) -> Result<Vec<FacetCount>> {
        lost()
    }
}

/// Fixture catalog shared by the store tests.
///
/// | id | title       | price | available | brand  | category | shop        |
/// |----|-------------|-------|-----------|--------|----------|-------------|
/// | 1  | Trail Shoe  | 45.00 | yes       | Acme   | Shoes    | Main Street |
/// | 2  | Wool Hat    | 12.00 | yes       | Zephyr | Hats     | City Outlet |
/// | 3  | Road Shoe   | none  | yes       | Acme   | Shoes    | Main Street |
/// | 4  | Mystery Box | none  | no        | none   | none     | City Outlet |
/// | 5  | Old Shoe    | 24.00 | no        | Acme   | Shoes    | none        |
pub async fn seed_catalog(db: &turbo_db::Db) {
    db.execute_batch(
        "INSERT INTO shops (id, name) VALUES (1, 'Main Street'), (2, 'City Outlet');
         INSERT INTO brands (id, name) VALUES (1, 'Acme'), (2, 'Zephyr');
         INSERT INTO categories (id, name, path) VALUES
             (1, 'Shoes', 'apparel/shoes'),
             (2, 'Hats', 'apparel/hats'),
             (3, 'Kettles', 'home/kettles');
         INSERT INTO products
             (id, title, description, search_text, price_cents, availability, ean, mpn, shop_id, brand_id, category_id)
         VALUES
             (1, 'Trail Shoe', 'Waterproof trail runner', NULL, 4500, 1, '4000000000001', 'TS-1', 1, 1, 1),
             (2, 'Wool Hat', NULL, 'beanie winter', 1200, 1, '4000000000002', NULL, 2, 2, 2),
             (3, 'Road Shoe', NULL, NULL, NULL, 1, '4000000000003', NULL, 1, 1, 1),
             (4, 'Mystery Box', NULL, NULL, NULL, 0, NULL, NULL, 2, NULL, NULL),
             (5, 'Old Shoe', NULL, NULL, 2400, 0, '4000000000005', NULL, NULL, 1, 1);
         INSERT INTO product_variants (id, product_id, color, size) VALUES
             (1, 1, 'Red', 'S'),
             (2, 1, 'Blue', 'M'),
             (3, 2, 'Grey', 'One Size');",
    )
    .await
    .expect("Failed to seed catalog");
}
