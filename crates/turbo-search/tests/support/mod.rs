//! Catalog fixtures for integration tests.

#![allow(dead_code)]

use turbo_db::{params, Statement};
use turbo_search::SqliteCatalog;

/// A product row to insert. Unset relations stay NULL.
#[derive(Debug, Clone)]
pub struct ProductFixture {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub availability: bool,
    pub ean: Option<String>,
    pub shop_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl ProductFixture {
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            price_cents: None,
            availability: true,
            ean: None,
            shop_id: None,
            brand_id: None,
            category_id: None,
        }
    }

    pub fn price(mut self, cents: i64) -> Self {
        self.price_cents = Some(cents);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.availability = false;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn ean(mut self, ean: &str) -> Self {
        self.ean = Some(ean.to_string());
        self
    }

    pub fn shop(mut self, id: i64) -> Self {
        self.shop_id = Some(id);
        self
    }

    pub fn brand(mut self, id: i64) -> Self {
        self.brand_id = Some(id);
        self
    }

    pub fn category(mut self, id: i64) -> Self {
        self.category_id = Some(id);
        self
    }
}

/// Builds an in-memory catalog row by row.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    statements: Vec<Statement>,
    next_variant_id: i64,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shop(mut self, id: i64, name: &str) -> Self {
        self.statements.push(Statement::new(
            "INSERT INTO shops (id, name) VALUES (?, ?)",
            params![id, name],
        ));
        self
    }

    pub fn brand(mut self, id: i64, name: &str) -> Self {
        self.statements.push(Statement::new(
            "INSERT INTO brands (id, name) VALUES (?, ?)",
            params![id, name],
        ));
        self
    }

    pub fn category(mut self, id: i64, name: &str, path: &str) -> Self {
        self.statements.push(Statement::new(
            "INSERT INTO categories (id, name, path) VALUES (?, ?, ?)",
            params![id, name, path],
        ));
        self
    }

    pub fn product(mut self, p: ProductFixture) -> Self {
        self.statements.push(Statement::new(
            "INSERT INTO products (id, title, description, price_cents, availability, ean, shop_id, brand_id, category_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                p.id,
                p.title,
                p.description,
                p.price_cents,
                p.availability,
                p.ean,
                p.shop_id,
                p.brand_id,
                p.category_id,
            ],
        ));
        self
    }

    pub fn variant(mut self, product_id: i64, color: Option<&str>, size: Option<&str>) -> Self {
        self.next_variant_id += 1;
        self.statements.push(Statement::new(
            "INSERT INTO product_variants (id, product_id, color, size) VALUES (?, ?, ?, ?)",
            params![self.next_variant_id, product_id, color, size],
        ));
        self
    }

    pub async fn build(self) -> SqliteCatalog {
        let catalog = SqliteCatalog::open_in_memory()
            .await
            .expect("Failed to open catalog");
        for stmt in &self.statements {
            catalog
                .db()
                .execute(stmt)
                .await
                .expect("Failed to insert fixture row");
        }
        catalog
    }
}

/// A small apparel catalog with every relation populated.
pub async fn apparel_catalog() -> SqliteCatalog {
    CatalogBuilder::new()
        .shop(1, "Main Street")
        .shop(2, "City Outlet")
        .brand(1, "Acme")
        .brand(2, "Zephyr")
        .brand(3, "Northwind")
        .category(1, "Shoes", "apparel/shoes")
        .category(2, "Shirts", "apparel/shirts")
        .product(
            ProductFixture::new(1, "Trail Runner")
                .description("Lightweight trail shoe")
                .price(8900)
                .ean("4000000000011")
                .shop(1)
                .brand(1)
                .category(1),
        )
        .product(ProductFixture::new(2, "Linen Shirt").price(3900).shop(2).brand(2).category(2))
        .product(ProductFixture::new(3, "Oxford Shirt").price(4900).shop(1).brand(2).category(2))
        .product(ProductFixture::new(4, "Court Shoe").price(3900).unavailable().shop(2).brand(1).category(1))
        .product(ProductFixture::new(5, "Sample Tee").shop(2).category(2))
        .product(ProductFixture::new(6, "Acme Socks").price(900).brand(1))
        .product(ProductFixture::new(7, "Canvas Shoe").price(2900).unavailable().brand(1).category(1))
        .variant(1, Some("Red"), Some("42"))
        .variant(1, Some("Black"), Some("44"))
        .variant(2, Some("White"), Some("M"))
        .variant(3, Some("Blue"), Some("L"))
        .variant(3, Some("White"), Some("M"))
        .build()
        .await
}
