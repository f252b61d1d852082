//! Database connection and statement execution.

use std::str::FromStr;
use std::time::Duration;

use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::debug;

use crate::{DbConfig, DbError, Statement, Value};

/// Pooled SQLite database handle.
///
/// Cloning is cheap; clones share the pool. Each statement runs on whichever
/// pooled connection is free, so independent callers never share a session.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open a pool using the given configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let db = Db::connect(&DbConfig::with_url("sqlite://catalog.db")).await?;
    /// ```
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::ConfigError(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .with_regexp()
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));
        if config.is_memory() {
            // Dropping the only connection would drop the database with it.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::OpenError(e.to_string()))?;

        debug!(url = %config.url, max_connections = config.max_connections, "database pool opened");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    pub async fn open_in_memory() -> Result<Self, DbError> {
        Self::connect(&DbConfig::in_memory()).await
    }

    /// Wrap an existing pool.
    ///
    /// Case-insensitive conditions need the pool's connect options to include
    /// `with_regexp()`.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a script of `;`-separated statements that take no parameters.
    ///
    /// Used for DDL; statements must not contain `;` inside string literals.
    pub async fn execute_batch(&self, script: &str) -> Result<(), DbError> {
        for sql in script.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Execute a statement that doesn't return rows, returning the affected row count.
    pub async fn execute(&self, stmt: &Statement) -> Result<u64, DbError> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "execute");
        let result = bind_query(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Execute a query and decode every row.
    pub async fn fetch_all<T>(&self, stmt: &Statement) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch_all");
        let rows = bind_query_as(sqlx::query_as::<_, T>(&stmt.sql), &stmt.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Execute a query and decode the first row, if any.
    pub async fn fetch_optional<T>(&self, stmt: &Statement) -> Result<Option<T>, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch_optional");
        let row = bind_query_as(sqlx::query_as::<_, T>(&stmt.sql), &stmt.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Execute a query and decode exactly one row.
    ///
    /// Returns [`DbError::NotFound`] if no rows are returned.
    pub async fn fetch_one<T>(&self, stmt: &Statement) -> Result<T, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        self.fetch_optional(stmt).await?.ok_or(DbError::NotFound)
    }
}

fn bind_query<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(i) => query.bind(*i),
            Value::Real(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.as_str()),
            Value::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}

fn bind_query_as<'q, T>(
    mut query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    params: &'q [Value],
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(i) => query.bind(*i),
            Value::Real(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.as_str()),
            Value::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}
