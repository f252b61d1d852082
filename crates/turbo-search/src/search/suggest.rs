//! Search-as-you-type suggestions.

use std::collections::HashSet;

use crate::context::OperationContext;
use crate::error::Result;
use crate::repository::CatalogRepository;

/// Merge title and brand suggestions: titles first, duplicates dropped
/// keeping the first occurrence, at most `limit` entries.
pub fn merge_suggestions(titles: Vec<String>, brands: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    titles
        .into_iter()
        .chain(brands)
        .filter(|s| seen.insert(s.clone()))
        .take(limit)
        .collect()
}

/// Suggest product titles and brand names containing `query`.
///
/// Each source contributes at most `limit / 2` candidates.
pub async fn suggest<R>(repo: &R, ctx: &OperationContext, query: &str, limit: u32) -> Result<Vec<String>>
where
    R: CatalogRepository + ?Sized,
{
    let per_source = limit / 2;
    if per_source == 0 {
        return Ok(Vec::new());
    }

    let titles = ctx.step(repo.title_suggestions(query, per_source)).await?;
    let brands = ctx.step(repo.brand_name_suggestions(query, per_source)).await?;
    Ok(merge_suggestions(titles, brands, limit as usize))
}
