//! Product and variant types.

use crate::catalog::{Brand, Category, Shop};
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog, with its relations resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: Option<String>,
    /// Extra text indexed for free-text matching only.
    pub search_text: Option<String>,
    /// Price; `None` when the shop lists no price.
    pub price: Option<Money>,
    /// Whether the product can currently be bought.
    pub availability: bool,
    /// European Article Number.
    pub ean: Option<String>,
    /// Manufacturer part number.
    pub mpn: Option<String>,
    pub shop: Option<Shop>,
    pub brand: Option<Brand>,
    pub category: Option<Category>,
    /// Purchasable options, ordered by id.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Create an available product with no price, identifiers or relations.
    pub fn new(id: ProductId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            search_text: None,
            price: None,
            availability: true,
            ean: None,
            mpn: None,
            shop: None,
            brand: None,
            category: None,
            variants: Vec::new(),
        }
    }

    /// Check if this product has purchasable options.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Formatted price, or a dash when unpriced.
    pub fn display_price(&self) -> String {
        self.price
            .map(|p| p.display())
            .unwrap_or_else(|| "\u{2013}".to_string())
    }

    /// Distinct colors offered across variants, in variant order.
    pub fn colors(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = Vec::new();
        for color in self.variants.iter().filter_map(|v| v.color.as_deref()) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }
}

/// A product variant (e.g., a color/size combination).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Parent product ID.
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl ProductVariant {
    pub fn new(id: VariantId, product_id: ProductId) -> Self {
        Self {
            id,
            product_id,
            color: None,
            size: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Build the variant name from its attributes (e.g., "Red / M").
    pub fn build_name(&self) -> String {
        let parts: Vec<&str> = [self.color.as_deref(), self.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            "Default".to_string()
        } else {
            parts.join(" / ")
        }
    }
}
