//! Row shapes decoded from catalog queries.

use crate::catalog::{Brand, Category, Product, ProductVariant, Shop};
use crate::ids::{BrandId, CategoryId, ProductId, ShopId, VariantId};
use crate::money::{Currency, Money};

/// Columns selected for a product joined with its shop, brand and category.
pub(crate) const PRODUCT_COLUMNS: &[&str] = &[
    "p.id",
    "p.title",
    "p.description",
    "p.search_text",
    "p.price_cents",
    "p.availability",
    "p.ean",
    "p.mpn",
    "p.shop_id",
    "s.name AS shop_name",
    "p.brand_id",
    "b.name AS brand_name",
    "p.category_id",
    "c.name AS category_name",
    "c.path AS category_path",
];

/// Joins backing [`PRODUCT_COLUMNS`].
pub(crate) const PRODUCT_JOINS: &[&str] = &[
    "LEFT JOIN shops s ON s.id = p.shop_id",
    "LEFT JOIN brands b ON b.id = p.brand_id",
    "LEFT JOIN categories c ON c.id = p.category_id",
];

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub search_text: Option<String>,
    pub price_cents: Option<i64>,
    pub availability: bool,
    pub ean: Option<String>,
    pub mpn: Option<String>,
    pub shop_id: Option<i64>,
    pub shop_name: Option<String>,
    pub brand_id: Option<i64>,
    pub brand_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_path: Option<String>,
}

impl ProductRow {
    /// Convert to a product without variants.
    pub fn into_product(self, currency: Currency) -> Product {
        let shop = match (self.shop_id, self.shop_name) {
            (Some(id), Some(name)) => Some(Shop::new(ShopId::new(id), name)),
            _ => None,
        };
        let brand = match (self.brand_id, self.brand_name) {
            (Some(id), Some(name)) => Some(Brand::new(BrandId::new(id), name)),
            _ => None,
        };
        let category = match (self.category_id, self.category_name) {
            (Some(id), Some(name)) => Some(Category::new(
                CategoryId::new(id),
                name,
                self.category_path.unwrap_or_default(),
            )),
            _ => None,
        };

        Product {
            id: ProductId::new(self.id),
            title: self.title,
            description: self.description,
            search_text: self.search_text,
            price: self.price_cents.map(|cents| Money::new(cents, currency)),
            availability: self.availability,
            ean: self.ean,
            mpn: self.mpn,
            shop,
            brand,
            category,
            variants: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct VariantRow {
    pub id: i64,
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<VariantRow> for ProductVariant {
    fn from(row: VariantRow) -> Self {
        ProductVariant {
            id: VariantId::new(row.id),
            product_id: ProductId::new(row.product_id),
            color: row.color,
            size: row.size,
        }
    }
}
