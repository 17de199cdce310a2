//! Uplia Services Layer
//!
//! This crate is the **business service layer**: it hosts the upload and
//! export pipelines and the streaming CSV encoder, and re-exports the store
//! and storage contracts so a transport layer (HTTP, CLI) can depend on a
//! single facade. Keep orchestration here; adapters stay in uplia-db and
//! uplia-storage.

pub mod services;

pub use services::csv::encode_csv;
pub use services::export::{ExportReport, ExportService};
pub use services::upload::UploadService;
pub use uplia_db::UploadStore;
pub use uplia_storage::{
    create_storage, ByteStream, Storage, StorageBackend, StorageError, StorageResult, StoredObject,
};
