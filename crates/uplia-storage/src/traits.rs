//! Storage abstraction trait
//!
//! This module defines the `Storage` trait that all storage backends must
//! implement, plus the stream and error types shared by the backends.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use uplia_core::{AppError, StorageBackend};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The content stream handed to `put` failed mid-iteration. The write is
    /// aborted; no object is left referenced.
    #[error("Content stream failed: {0}")]
    StreamAborted(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::StreamAborted(msg) => AppError::Stream(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Single-pass stream of byte chunks consumed by [`Storage::put`].
///
/// Backends consume the stream incrementally; the total length does not need
/// to be known up front. A chunk-level error aborts the in-flight upload.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send + 'static>>;

/// Key and public URL of an object written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Internal identifier used to reference the object.
    pub key: String,
    /// Publicly accessible URL of the object.
    pub url: String,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait so
/// the pipelines can work with any backend without coupling to
/// implementation details.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a byte stream and return the assigned key and public URL.
    ///
    /// The key is assigned by the backend (see the crate root documentation
    /// for the format). The stream is consumed exactly once and is read
    /// chunk by chunk, so a slow backend naturally throttles the producer.
    /// On failure no key or URL is returned and no object remains
    /// referenced.
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        content: ByteStream,
    ) -> StorageResult<StoredObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
