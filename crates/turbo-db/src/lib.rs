//! Typed SQLite query layer for TurboSearch.
//!
//! Provides a small, ergonomic API over an `sqlx` SQLite pool: bind values,
//! composable conditions, a SELECT builder, and typed row decoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_db::{Condition, Db, DbConfig, Select};
//!
//! let db = Db::connect(&DbConfig::with_url("sqlite://catalog.db")).await?;
//!
//! let stmt = Select::from("products")
//!     .columns(&["id", "title"])
//!     .filter(Condition::contains_ci("title", "rust"))
//!     .filter(Condition::le("price_cents", 5000))
//!     .order_by("id ASC")
//!     .build();
//!
//! let rows: Vec<(i64, String)> = db.fetch_all(&stmt).await?;
//! ```

mod config;
mod db;
mod error;
mod query;
mod types;

pub use config::{DbConfig, MEMORY_URL};
pub use db::Db;
pub use error::DbError;
pub use query::{Condition, Select, Statement, INLINE_LIST_LIMIT};
pub use types::Value;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{params, Condition, Db, DbConfig, DbError, Select, Statement, Value};
}

/// Create a parameter list for SQL statements.
///
/// # Example
///
/// ```rust
/// use turbo_db::{params, Statement};
///
/// let stmt = Statement::new("INSERT INTO brands (id, name) VALUES (?, ?)", params![1, "Acme"]);
/// assert_eq!(stmt.params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($param:expr),+ $(,)?) => {
        vec![$($crate::Value::from($param)),+]
    };
}
