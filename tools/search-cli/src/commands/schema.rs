//! Schema command.

use anyhow::Result;
use turbo_search::CATALOG_SCHEMA;

use super::SchemaArgs;
use crate::context::Context;

/// Run the schema command.
pub async fn run(args: SchemaArgs, ctx: &Context) -> Result<()> {
    if !args.install {
        println!("{}", CATALOG_SCHEMA.trim());
        return Ok(());
    }

    let service = ctx.service().await?;
    service.repository().install_schema().await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "installed": true,
            "database": ctx.config.database.url,
        }));
    } else {
        ctx.output.info(&format!("Catalog schema installed in {}", ctx.config.database.url));
    }

    Ok(())
}
