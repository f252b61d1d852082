//! Suggestion command.

use anyhow::Result;

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service().await?;
    let op = ctx.operation(&service);

    let suggestions = service.suggest(&op, &args.query, args.limit).await?;

    if ctx.output.is_json() {
        ctx.output.json(&suggestions);
        return Ok(());
    }

    if suggestions.is_empty() {
        ctx.output.info(&format!("No suggestions for '{}'", args.query));
        return Ok(());
    }

    ctx.output.header(&format!("Suggestions for '{}'", args.query));
    for suggestion in &suggestions {
        ctx.output.list_item(suggestion);
    }

    Ok(())
}
