//! Search error types.

use thiserror::Error;

use crate::money::Currency;

/// Result type alias using [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur in search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The data store failed (connection loss, query failure, bad row).
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// More than one product carries an identifier that should be unique.
    #[error("Identifier {0} matches more than one product")]
    DuplicateIdentifier(String),

    /// The operation was cancelled by its caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// The operation ran past its deadline.
    #[error("Operation exceeded its deadline")]
    DeadlineExceeded,

    /// A price bound is in a different currency than the catalog's prices.
    #[error("Price bound is in {found}, but catalog prices are in {expected}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<turbo_db::DbError> for SearchError {
    fn from(e: turbo_db::DbError) -> Self {
        SearchError::DatabaseError(e.to_string())
    }
}
