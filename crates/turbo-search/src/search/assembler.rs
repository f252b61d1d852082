//! Counts, pages and packages search results.

use std::time::Instant;

use tracing::debug;

use crate::context::OperationContext;
use crate::error::Result;
use crate::repository::CatalogRepository;
use crate::search::{ComposedQuery, PageRequest, SearchResults};

/// Run a composed query: count the full match set, then fetch one page.
///
/// An unsatisfiable filter returns an empty result without touching the
/// store. A page past the end returns no products but the true total.
pub async fn assemble<R>(
    repo: &R,
    ctx: &OperationContext,
    composed: ComposedQuery,
    page: PageRequest,
    started: Instant,
) -> Result<SearchResults>
where
    R: CatalogRepository + ?Sized,
{
    let ComposedQuery { filter, applied } = composed;

    if filter.is_unsatisfiable() {
        debug!("filter cannot match; skipping store queries");
        return Ok(SearchResults::empty(page, applied).with_execution_time(started.elapsed()));
    }

    let total = ctx.step(repo.count_products(&filter)).await?;
    let products = if page.offset() < total {
        ctx.step(repo.fetch_products(&filter, page)).await?
    } else {
        Vec::new()
    };

    debug!(total, returned = products.len(), page = page.page(), "results assembled");
    Ok(SearchResults::new(products, total, page, applied).with_execution_time(started.elapsed()))
}
