//! Facet command.

use anyhow::Result;
use turbo_search::SearchCriteria;

use super::FacetsArgs;
use crate::context::Context;

/// Run the facets command.
pub async fn run(_args: FacetsArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service().await?;
    let op = ctx.operation(&service);

    let facets = service.facets(&op, &SearchCriteria::new()).await?;

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    if facets.is_empty() {
        ctx.output.info("The catalog is empty.");
        return Ok(());
    }

    ctx.output.counts("Brands", &facets.brands);
    ctx.output.counts("Categories", &facets.categories);

    if let Some(ranges) = &facets.price_ranges {
        ctx.output.header("Prices");
        for range in ranges {
            ctx.output.table_row(&[&range.label, &range.range], &[24, 12]);
        }
    }

    Ok(())
}
