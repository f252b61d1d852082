//! SQLite storage for the catalog.

mod rows;
mod schema;
mod sqlite;

pub use schema::CATALOG_SCHEMA;
pub use sqlite::SqliteCatalog;
