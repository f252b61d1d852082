//! Exact lookup command.

use anyhow::{bail, Result};
use turbo_search::Lookup;

use super::LookupArgs;
use crate::context::Context;

/// Run the lookup command.
pub async fn run(args: LookupArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service().await?;
    let op = ctx.operation(&service);

    let product = match service.lookup_by_identifier(&op, &args.ean).await? {
        Lookup::Found(product) => product,
        Lookup::NotFound => bail!("No product with EAN '{}'", args.ean),
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Price", &product.display_price());
    ctx.output.kv("Stock", &crate::output::availability_badge(product.availability));
    if let Some(ean) = &product.ean {
        ctx.output.kv("EAN", ean);
    }
    if let Some(mpn) = &product.mpn {
        ctx.output.kv("MPN", mpn);
    }
    if let Some(brand) = &product.brand {
        ctx.output.kv("Brand", &brand.name);
    }
    if let Some(category) = &product.category {
        ctx.output.kv("Category", &category.breadcrumb());
    }
    if let Some(shop) = &product.shop {
        ctx.output.kv("Shop", &shop.name);
    }
    if let Some(description) = &product.description {
        ctx.output.kv("Description", description);
    }

    if product.has_variants() {
        ctx.output.header("Variants");
        for variant in &product.variants {
            ctx.output.list_item(&variant.build_name());
        }
    }

    Ok(())
}
