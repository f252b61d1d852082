//! Filtered product search for TurboSearch.
//!
//! This crate answers read-only questions about a relational product catalog:
//!
//! - **Search**: conjunctive filters (text, brand, category, price, availability,
//!   identifiers, shop, variant color/size), counted and paginated
//! - **Lookup**: exact match by EAN
//! - **Suggestions**: product titles and brand names for search-as-you-type
//! - **Facets**: brand and category counts plus price buckets
//! - **Category search**: categories by name, with product counts
//!
//! Storage sits behind the [`CatalogRepository`] trait; [`SqliteCatalog`]
//! implements it over `turbo-db`.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_search::prelude::*;
//!
//! let catalog = SqliteCatalog::connect(&DbConfig::with_url("sqlite://catalog.db")).await?;
//! let service = SearchService::new(catalog);
//!
//! let criteria = SearchCriteria::new()
//!     .with_brand("acme")
//!     .with_max_price(Money::from_decimal(80.0, Currency::EUR))
//!     .with_availability(true);
//!
//! let ctx = service.context();
//! let results = service.search(&ctx, &criteria, PageRequest::new(1, 20)).await?;
//! println!("{} products on {} pages", results.total, results.total_pages);
//!
//! // Pages that would rather show "no results" than fail:
//! let facets = service.lenient().facets(&ctx, &criteria).await;
//! ```

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod lenient;
pub mod money;
pub mod repository;
pub mod search;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::SearchConfig;
pub use context::OperationContext;
pub use error::{Result, SearchError};
pub use ids::*;
pub use lenient::LenientSearch;
pub use money::{Currency, Money};
pub use repository::CatalogRepository;
pub use search::{
    FacetCount, Facets, Filter, Lookup, PageRequest, PriceRange, SearchCriteria, SearchResults,
};
pub use service::SearchService;
pub use store::{SqliteCatalog, CATALOG_SCHEMA};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::context::OperationContext;
    pub use crate::error::SearchError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::repository::CatalogRepository;
    pub use crate::service::SearchService;
    pub use crate::store::SqliteCatalog;
    pub use turbo_db::DbConfig;

    // Catalog
    pub use crate::catalog::{Brand, Category, Product, ProductVariant, Shop};

    // Search
    pub use crate::search::{
        AppliedFilters, FacetCount, Facets, Filter, Lookup, PageRequest, Pagination, PriceRange,
        SearchCriteria, SearchResults,
    };
}
