//! Uplia Database Library
//!
//! This crate provides the metadata store: the `UploadStore` contract, its
//! Postgres implementation, pool construction and embedded migrations.

pub mod db;

// Re-export commonly used types
pub use db::{connect, run_migrations, PgUploadStore, UploadStore};
