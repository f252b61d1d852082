//! Lenient boundary: every operation returns a value, never an error.
//!
//! Failures are logged and replaced with an empty result of the right
//! shape, so callers such as page renderers can show "no results" instead
//! of failing.

use std::time::Instant;

use tracing::error;

use crate::catalog::Product;
use crate::context::OperationContext;
use crate::repository::CatalogRepository;
use crate::search::{FacetCount, Facets, PageRequest, SearchCriteria, SearchResults};
use crate::service::SearchService;

/// Borrowed view of a [`SearchService`] that swallows failures.
#[derive(Debug)]
pub struct LenientSearch<'a, R> {
    service: &'a SearchService<R>,
}

impl<'a, R: CatalogRepository> LenientSearch<'a, R> {
    pub fn new(service: &'a SearchService<R>) -> Self {
        Self { service }
    }

    /// Search, or an empty page echoing the requested filters.
    pub async fn search(
        &self,
        ctx: &OperationContext,
        criteria: &SearchCriteria,
        page: PageRequest,
    ) -> SearchResults {
        let started = Instant::now();
        match self.service.search(ctx, criteria, page).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Search error");
                let page = page.limit_per_page(self.service.config().max_per_page);
                SearchResults::empty(page, criteria.applied_filters())
                    .with_execution_time(started.elapsed())
            }
        }
    }

    /// Look up by EAN; any failure, duplicates included, reads as not found.
    pub async fn lookup_by_identifier(&self, ctx: &OperationContext, ean: &str) -> Option<Product> {
        match self.service.lookup_by_identifier(ctx, ean).await {
            Ok(lookup) => lookup.into_option(),
            Err(e) => {
                error!(error = %e, ean, "Lookup error");
                None
            }
        }
    }

    pub async fn suggest(&self, ctx: &OperationContext, query: &str, limit: Option<u32>) -> Vec<String> {
        self.service
            .suggest(ctx, query, limit)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Suggestion error");
                Vec::new()
            })
    }

    pub async fn facets(&self, ctx: &OperationContext, criteria: &SearchCriteria) -> Facets {
        self.service.facets(ctx, criteria).await.unwrap_or_else(|e| {
            error!(error = %e, "Facets error");
            Facets::default()
        })
    }

    pub async fn search_categories(
        &self,
        ctx: &OperationContext,
        query: &str,
        limit: Option<u32>,
    ) -> Vec<FacetCount> {
        self.service
            .search_categories(ctx, query, limit)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Category search error");
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRepository, StubRepository};
    use serde_json::json;

    #[tokio::test]
    async fn test_failed_search_echoes_request() {
        let service = SearchService::new(FailingRepository);
        let criteria = SearchCriteria::new().with_brand("acme").with_availability(true);

        let results = service
            .lenient()
            .search(&OperationContext::new(), &criteria, PageRequest::new(3, 20))
            .await;

        assert!(results.products.is_empty());
        assert_eq!(results.total, 0);
        assert_eq!(results.total_pages, 0);
        assert_eq!(results.page, 3);
        assert_eq!(results.per_page, 20);
        assert_eq!(results.filters_applied.get("brand"), Some(&json!("acme")));
        assert_eq!(results.filters_applied.get("availability"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_failed_reads_become_empty_values() {
        let service = SearchService::new(FailingRepository);
        let lenient = service.lenient();
        let ctx = OperationContext::new();

        assert!(lenient.lookup_by_identifier(&ctx, "123").await.is_none());
        assert!(lenient.suggest(&ctx, "red", None).await.is_empty());
        assert!(lenient.search_categories(&ctx, "shoe", None).await.is_empty());

        let facets = lenient.facets(&ctx, &SearchCriteria::new()).await;
        assert!(facets.is_empty());
        assert!(facets.price_ranges.is_none());
    }

    #[tokio::test]
    async fn test_cancellation_is_swallowed() {
        let service = SearchService::new(StubRepository::default());
        let ctx = OperationContext::new();
        ctx.cancel();

        let results = service
            .lenient()
            .search(&ctx, &SearchCriteria::new(), PageRequest::default())
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_identifier_reads_as_not_found() {
        use crate::ids::ProductId;

        let repo = StubRepository {
            products: vec![
                Product::new(ProductId::new(1), "A"),
                Product::new(ProductId::new(2), "B"),
            ],
            ..Default::default()
        };
        let service = SearchService::new(repo);

        let found = service
            .lenient()
            .lookup_by_identifier(&OperationContext::new(), "dup")
            .await;
        assert!(found.is_none());
    }
}
