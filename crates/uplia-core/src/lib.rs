//! Uplia Core Library
//!
//! This crate provides the core domain model, error types and configuration
//! shared across all Uplia components.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use models::Upload;
pub use storage_types::StorageBackend;
// Note: Storage, StorageError, StorageResult live in uplia-storage.
// Import them directly from uplia-storage instead of uplia-core.
