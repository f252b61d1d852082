//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_search::{OperationContext, SearchService, SqliteCatalog};

use crate::config::AppConfig;
use crate::output::Output;

/// Values given on the command line that win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration.
    pub config: AppConfig,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from a config file, then apply command line overrides.
    pub fn load(config_path: Option<&str>, overrides: Overrides, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            AppConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        if let Some(url) = overrides.database_url {
            config.database.url = url;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            config.search.query_timeout_ms = timeout_ms;
        }
        config.validate()?;

        Ok(Self { config, output })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Option<AppConfig> {
        let config_names = ["turbo-search.toml", ".turbo-search.toml", "turbo-search.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path: PathBuf = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = AppConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the catalog and wrap it in a search service.
    pub async fn service(&self) -> Result<SearchService<SqliteCatalog>> {
        self.output.debug(&format!("Opening catalog at {}", self.config.database.url));
        let catalog = SqliteCatalog::connect(&self.config.database)
            .await
            .with_context(|| format!("Failed to open catalog: {}", self.config.database.url))?
            .with_currency(self.config.search.currency);

        Ok(SearchService::with_config(catalog, self.config.search.clone()))
    }

    /// An operation context that is cancelled on Ctrl-C.
    pub fn operation(&self, service: &SearchService<SqliteCatalog>) -> OperationContext {
        let op = service.context();
        let token = op.cancellation_token().clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
        op
    }
}
