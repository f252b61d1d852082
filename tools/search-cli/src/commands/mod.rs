//! CLI command implementations.

pub mod categories;
pub mod facets;
pub mod lookup;
pub mod schema;
pub mod search;
pub mod suggest;

use clap::Args;
use turbo_search::{Currency, Money, SearchCriteria};

/// Arguments for the search command.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Text to find in title, description or search keywords.
    pub query: Option<String>,

    /// Brand name (substring, case-insensitive).
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Category name or path (substring, case-insensitive).
    #[arg(long)]
    pub category: Option<String>,

    /// Shop name (substring, case-insensitive).
    #[arg(long)]
    pub shop: Option<String>,

    /// Lowest price, in currency units.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, in currency units.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products with this availability.
    #[arg(long)]
    pub available: Option<bool>,

    /// Exact EAN.
    #[arg(long)]
    pub ean: Option<String>,

    /// Exact manufacturer part number.
    #[arg(long)]
    pub mpn: Option<String>,

    /// Variant color (substring, case-insensitive).
    #[arg(long)]
    pub color: Option<String>,

    /// Variant size (substring, case-insensitive).
    #[arg(long)]
    pub size: Option<String>,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: i64,

    /// Results per page (default from config).
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Print an empty page instead of failing on store errors.
    #[arg(long)]
    pub lenient: bool,
}

impl SearchArgs {
    /// Build search criteria, reading prices in `currency`.
    pub fn criteria(&self, currency: Currency) -> SearchCriteria {
        let price = |amount: f64| Money::from_decimal(amount, currency);
        SearchCriteria {
            title: self.query.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            min_price: self.min_price.map(price),
            max_price: self.max_price.map(price),
            availability: self.available,
            ean: self.ean.clone(),
            mpn: self.mpn.clone(),
            shop: self.shop.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }
}

/// Arguments for the lookup command.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// EAN to look up.
    pub ean: String,
}

/// Arguments for the suggest command.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Partial query.
    pub query: String,

    /// Maximum number of suggestions (default from config).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the facets command.
#[derive(Args, Debug, Default)]
pub struct FacetsArgs {}

/// Arguments for the categories command.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Category name fragment.
    pub query: String,

    /// Maximum number of categories (default from config).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the schema command.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Create the tables in the configured database instead of printing them.
    #[arg(long)]
    pub install: bool,
}
