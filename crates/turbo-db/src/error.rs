//! Database error types.

use thiserror::Error;

/// Errors that can occur when using the database.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open the database or acquire a connection.
    #[error("Failed to open database: {0}")]
    OpenError(String),

    /// Failed to execute a query.
    #[error("Query execution failed: {0}")]
    QueryError(String),

    /// Failed to decode a row.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),

    /// The connection settings could not be parsed.
    #[error("Invalid database configuration: {0}")]
    ConfigError(String),

    /// No rows returned when one was expected.
    #[error("No rows returned")]
    NotFound,
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Configuration(_) => DbError::ConfigError(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::OpenError(e.to_string())
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => DbError::DeserializeError(e.to_string()),
            _ => DbError::QueryError(e.to_string()),
        }
    }
}
