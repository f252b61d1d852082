//! TurboSearch CLI - query a product catalog from the command line.
//!
//! Commands:
//! - `turbo-search search` - Filtered, paginated product search
//! - `turbo-search lookup` - Find a product by EAN
//! - `turbo-search suggest` - Search-as-you-type suggestions
//! - `turbo-search facets` - Brand, category and price facets
//! - `turbo-search categories` - Find categories by name
//! - `turbo-search schema` - Print or install the catalog schema

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CategoriesArgs, FacetsArgs, LookupArgs, SchemaArgs, SearchArgs, SuggestArgs};

/// TurboSearch CLI - Search a product catalog
#[derive(Parser)]
#[command(name = "turbo-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog database URL (overrides the config file)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Per-operation deadline in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products
    Search(SearchArgs),

    /// Look up a product by EAN
    Lookup(LookupArgs),

    /// Suggest product titles and brand names
    Suggest(SuggestArgs),

    /// Show catalog facets
    Facets(FacetsArgs),

    /// Find categories by name
    Categories(CategoriesArgs),

    /// Print or install the catalog schema
    Schema(SchemaArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let overrides = context::Overrides {
        database_url: cli.database_url,
        timeout_ms: cli.timeout_ms,
    };
    let ctx = match context::Context::load(cli.config.as_deref(), overrides, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Lookup(args) => commands::lookup::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Schema(args) => commands::schema::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
