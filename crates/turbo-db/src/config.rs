//! Connection configuration.

use serde::{Deserialize, Serialize};

/// URL used for private in-memory databases.
pub const MEMORY_URL: &str = "sqlite::memory:";

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// SQLite connection URL (e.g. `sqlite://catalog.db`).
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long a statement waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://catalog.db".to_string(),
            max_connections: 5,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DbConfig {
    /// Config for a file-backed (or any URL-addressed) database.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Config for a private in-memory database.
    ///
    /// Every connection to `sqlite::memory:` opens its own database, so the
    /// pool is limited to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: MEMORY_URL.to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Whether this config points at an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_URL || self.url.contains("mode=memory")
    }
}
