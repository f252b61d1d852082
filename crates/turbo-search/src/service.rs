//! The search service.

use std::time::Instant;

use tracing::instrument;

use crate::catalog::Product;
use crate::config::SearchConfig;
use crate::context::OperationContext;
use crate::error::Result;
use crate::lenient::LenientSearch;
use crate::repository::CatalogRepository;
use crate::search::{
    self, FacetCount, Facets, Lookup, PageRequest, SearchCriteria, SearchResults,
};

/// Filtered product search over a catalog repository.
///
/// Holds no mutable state; clone it freely and call it from concurrent
/// tasks. Each operation issues its store queries one after another.
#[derive(Debug, Clone)]
pub struct SearchService<R> {
    repo: R,
    config: SearchConfig,
}

impl<R: CatalogRepository> SearchService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, SearchConfig::default())
    }

    pub fn with_config(repo: R, config: SearchConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// A fresh context carrying the configured deadline, if any.
    pub fn context(&self) -> OperationContext {
        match self.config.query_timeout() {
            Some(timeout) => OperationContext::new().with_timeout(timeout),
            None => OperationContext::new(),
        }
    }

    /// Search the catalog.
    ///
    /// Results are ordered available first, then by ascending price with
    /// unpriced products last, then by product id.
    #[instrument(skip_all, fields(page = page.page(), per_page = page.per_page()))]
    pub async fn search(
        &self,
        ctx: &OperationContext,
        criteria: &SearchCriteria,
        page: PageRequest,
    ) -> Result<SearchResults> {
        let started = Instant::now();
        let page = page.limit_per_page(self.config.max_per_page);

        let resolved = search::resolve(&self.repo, ctx, criteria).await?;
        let composed = search::compose(criteria, &resolved);
        search::assemble(&self.repo, ctx, composed, page, started).await
    }

    /// Look up the product with this EAN.
    #[instrument(skip(self, ctx))]
    pub async fn lookup_by_identifier(&self, ctx: &OperationContext, ean: &str) -> Result<Lookup> {
        search::lookup_by_ean(&self.repo, ctx, ean).await
    }

    /// Like [`lookup_by_identifier`](Self::lookup_by_identifier), as an option.
    pub async fn find_by_identifier(&self, ctx: &OperationContext, ean: &str) -> Result<Option<Product>> {
        Ok(self.lookup_by_identifier(ctx, ean).await?.into_option())
    }

    /// Titles and brand names containing `query`.
    #[instrument(skip(self, ctx))]
    pub async fn suggest(
        &self,
        ctx: &OperationContext,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<String>> {
        let limit = limit.unwrap_or(self.config.suggestion_limit);
        search::suggest(&self.repo, ctx, query, limit).await
    }

    /// Brand, category and price facets.
    ///
    /// Facets always summarize the whole catalog; `criteria` does not narrow
    /// them.
    #[instrument(skip_all)]
    pub async fn facets(&self, ctx: &OperationContext, _criteria: &SearchCriteria) -> Result<Facets> {
        search::aggregate(&self.repo, ctx, self.config.facet_limit).await
    }

    /// Categories whose name contains `query`, with product counts.
    #[instrument(skip(self, ctx))]
    pub async fn search_categories(
        &self,
        ctx: &OperationContext,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<FacetCount>> {
        let limit = limit.unwrap_or(self.config.category_limit);
        ctx.step(self.repo.categories_matching(query, limit)).await
    }

    /// The same operations, with failures logged and replaced by empty values.
    pub fn lenient(&self) -> LenientSearch<'_, R> {
        LenientSearch::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::test_support::StubRepository;

    #[tokio::test]
    async fn test_search_caps_page_size_by_config() {
        let repo = StubRepository {
            total: 500,
            products: vec![Product::new(ProductId::new(1), "One")],
            ..Default::default()
        };
        let config = SearchConfig {
            max_per_page: 25,
            ..Default::default()
        };
        let service = SearchService::with_config(repo, config);

        let results = service
            .search(&OperationContext::new(), &SearchCriteria::new(), PageRequest::new(1, 80))
            .await
            .unwrap();
        assert_eq!(results.per_page, 25);
        assert_eq!(results.total_pages, 20);
    }

    #[tokio::test]
    async fn test_suggest_uses_configured_limit() {
        let repo = StubRepository {
            titles: (1..=10).map(|i| format!("Item {}", i)).collect(),
            ..Default::default()
        };
        let config = SearchConfig {
            suggestion_limit: 4,
            ..Default::default()
        };
        let service = SearchService::with_config(repo, config);

        let suggestions = service.suggest(&OperationContext::new(), "item", None).await.unwrap();
        assert_eq!(suggestions, vec!["Item 1", "Item 2"]);
    }

    #[tokio::test]
    async fn test_search_categories_uses_configured_limit() {
        let repo = StubRepository {
            categories: (1..=12).map(|i| FacetCount::new(format!("Cat {}", i), 1)).collect(),
            ..Default::default()
        };
        let service = SearchService::new(repo);

        let categories = service
            .search_categories(&OperationContext::new(), "cat", None)
            .await
            .unwrap();
        assert_eq!(categories.len(), 10);
    }

    #[tokio::test]
    async fn test_find_by_identifier() {
        let service = SearchService::new(StubRepository::default());
        let found = service
            .find_by_identifier(&OperationContext::new(), "404")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_context_carries_configured_deadline() {
        let config = SearchConfig {
            query_timeout_ms: 500,
            ..Default::default()
        };
        let service = SearchService::with_config(StubRepository::default(), config);
        assert!(service.context().deadline().is_some());
        assert!(SearchService::new(StubRepository::default()).context().deadline().is_none());
    }
}
