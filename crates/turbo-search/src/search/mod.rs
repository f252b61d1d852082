//! Search module.
//!
//! The pipeline of one search: criteria are resolved against the catalog
//! (`resolver`), composed into a typed filter (`composer`), then counted
//! and paged (`assembler`). Facets, suggestions and exact lookup are
//! separate read paths over the same repository.

mod assembler;
mod composer;
mod criteria;
mod facets;
mod filter;
mod lookup;
mod predicate;
mod resolver;
mod results;
mod suggest;

pub use assembler::assemble;
pub use composer::{compose, ComposedQuery};
pub use criteria::{PageRequest, SearchCriteria};
pub use facets::{aggregate, price_ranges, FacetCount, Facets, PriceRange, PriceStats};
pub use filter::{AppliedFilters, Filter};
pub use lookup::{lookup_by_ean, Lookup};
pub use predicate::{ProductFilter, ProductPredicate, VariantQuery};
pub use resolver::{resolve, Resolution, ResolvedFilters};
pub use results::{Pagination, SearchResults};
pub use suggest::{merge_suggestions, suggest};
