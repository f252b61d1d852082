//! Product search command.

use anyhow::Result;
use turbo_search::{PageRequest, SearchResults};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service().await?;
    let op = ctx.operation(&service);

    let criteria = args.criteria(service.config().currency);
    let page = match args.per_page {
        Some(per_page) => PageRequest::new(args.page, per_page),
        None => service.config().page(args.page),
    };

    let results = if args.lenient {
        service.lenient().search(&op, &criteria, page).await
    } else {
        service.search(&op, &criteria, page).await?
    };

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    print_results(&results, ctx);
    Ok(())
}

fn print_results(results: &SearchResults, ctx: &Context) {
    let pagination = results.pagination();
    ctx.output.header(&format!(
        "{} product(s), page {} of {}",
        results.total,
        results.page,
        pagination.total_pages.max(1)
    ));

    if !results.filters_applied.is_empty() {
        for (name, value) in results.filters_applied.iter() {
            ctx.output.kv(name, &value.to_string());
        }
        ctx.output.info("");
    }

    if results.is_empty() {
        ctx.output.info("No products matched.");
        return;
    }

    ctx.output.products(&results.products);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} ({:.2} ms)",
        pagination.start_item(),
        pagination.end_item(),
        results.execution_time_ms
    ));
    if pagination.has_next() {
        ctx.output.info(&format!("Next: --page {}", results.page + 1));
    }
}
