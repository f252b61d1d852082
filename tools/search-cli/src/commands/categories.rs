//! Category search command.

use anyhow::Result;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service().await?;
    let op = ctx.operation(&service);

    let categories = service.search_categories(&op, &args.query, args.limit).await?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        ctx.output.info(&format!("No categories match '{}'", args.query));
        return Ok(());
    }

    ctx.output.counts(&format!("Categories matching '{}'", args.query), &categories);
    Ok(())
}
