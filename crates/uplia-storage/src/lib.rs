//! Uplia Storage Library
//!
//! This crate provides the object-storage abstraction and implementations.
//! It includes the `Storage` trait and backends for S3 and the local
//! filesystem.
//!
//! # Storage key format
//!
//! Keys are sink-assigned: `uploads/{uuid}-{filename}`. The uuid prefix makes
//! keys unique regardless of the supplied filename. Keys must not contain
//! `..` path components or a leading `/`. Key generation is centralized in
//! the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult, StoredObject};
pub use uplia_core::StorageBackend;
