//! Error types for the SQL writer.

use barvault_types::ValidationError;
use thiserror::Error;

use crate::Table;

/// Result type alias for writer operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Errors that can occur while persisting rows.
#[derive(Error, Debug)]
pub enum WriteError {
    /// A referenced dimension row does not exist.
    #[error("{table} row {id} does not exist")]
    ForeignKey {
        /// The referenced table.
        table: Table,
        /// The missing id.
        id: i64,
    },

    /// A row failed validation; nothing was written.
    #[error("Row {index} is invalid: {source}")]
    Validation {
        /// Position of the row in the submitted batch.
        index: usize,
        /// The validation failure.
        source: ValidationError,
    },

    /// The database rejected the statement or the connection failed.
    #[error("Database error: {0}")]
    Connection(#[from] rusqlite::Error),
}
