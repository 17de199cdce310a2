//! Error types module
//!
//! All fallible operations in the upload and export pipelines return
//! `Result<_, AppError>`. The variants are deliberately coarse tags: callers
//! branch on what failed (store, storage, stream, input), not on backend
//! details.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature so that storage-only consumers can build without a database stack.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The metadata store rejected a query or insert.
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    /// A store-level uniqueness conflict (duplicate `remote_key`).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The object-storage sink rejected or failed mid-transfer.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record or chunk sequence failed mid-iteration. The in-flight upload
    /// is aborted rather than truncated.
    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}
