//! Exact lookup by EAN.

use tracing::warn;

use crate::catalog::Product;
use crate::context::OperationContext;
use crate::error::{Result, SearchError};
use crate::repository::CatalogRepository;
use crate::search::{PageRequest, ProductFilter, ProductPredicate};

/// Outcome of an exact lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Box<Product>),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<Product> {
        match self {
            Lookup::Found(product) => Some(*product),
            Lookup::NotFound => None,
        }
    }
}

/// Find the single product carrying `ean`.
///
/// Fetches at most two rows so a duplicated identifier is detected rather
/// than silently resolved to one of its products.
pub async fn lookup_by_ean<R>(repo: &R, ctx: &OperationContext, ean: &str) -> Result<Lookup>
where
    R: CatalogRepository + ?Sized,
{
    if ean.is_empty() {
        return Ok(Lookup::NotFound);
    }

    let filter = ProductFilter::new().and(ProductPredicate::Ean(ean.to_string()));
    let mut matches = ctx.step(repo.fetch_products(&filter, PageRequest::new(1, 2))).await?;

    if matches.len() > 1 {
        warn!(ean, "identifier shared by several products");
        return Err(SearchError::DuplicateIdentifier(ean.to_string()));
    }

    Ok(match matches.pop() {
        Some(product) => Lookup::Found(Box::new(product)),
        None => Lookup::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::test_support::StubRepository;

    #[tokio::test]
    async fn test_found() {
        let mut product = Product::new(ProductId::new(5), "Kettle");
        product.ean = Some("4006381333931".into());
        let repo = StubRepository {
            products: vec![product.clone()],
            ..Default::default()
        };

        let lookup = lookup_by_ean(&repo, &OperationContext::new(), "4006381333931").await.unwrap();
        assert!(lookup.is_found());
        assert_eq!(lookup.into_option(), Some(product));
    }

    #[tokio::test]
    async fn test_not_found() {
        let repo = StubRepository::default();
        let lookup = lookup_by_ean(&repo, &OperationContext::new(), "0000000000000").await.unwrap();
        assert_eq!(lookup, Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_empty_identifier_is_not_found() {
        let repo = StubRepository::default();
        let lookup = lookup_by_ean(&repo, &OperationContext::new(), "").await.unwrap();
        assert_eq!(lookup, Lookup::NotFound);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_identifier() {
        let repo = StubRepository {
            products: vec![
                Product::new(ProductId::new(1), "A"),
                Product::new(ProductId::new(2), "B"),
            ],
            ..Default::default()
        };

        let err = lookup_by_ean(&repo, &OperationContext::new(), "123").await.unwrap_err();
        assert!(matches!(err, SearchError::DuplicateIdentifier(ref ean) if ean == "123"));
    }
}
