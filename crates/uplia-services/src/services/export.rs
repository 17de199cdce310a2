//! Export pipeline: stream matching records as a CSV report into storage.

use crate::services::csv::encode_csv;
use futures::StreamExt;
use std::sync::Arc;
use uplia_core::AppError;
use uplia_db::UploadStore;
use uplia_storage::Storage;
use uuid::Uuid;

/// Result of a successful export: the download URL of the report object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub report_url: String,
}

/// Orchestrates CSV exports of upload metadata.
///
/// Rows flow from the store cursor through the encoder into the storage sink
/// one at a time; the report never materializes in memory and a slow sink
/// throttles the query. The report itself is a transient artifact and is not
/// recorded as an upload.
#[derive(Clone)]
pub struct ExportService {
    store: Arc<dyn UploadStore>,
    storage: Arc<dyn Storage>,
}

impl ExportService {
    pub fn new(store: Arc<dyn UploadStore>, storage: Arc<dyn Storage>) -> Self {
        Self { store, storage }
    }

    /// Export all uploads whose name contains `search_query`.
    ///
    /// An empty query exports everything. Returns the report URL on success;
    /// a store failure before the first row is returned as-is without
    /// creating a report object, and a failure mid-stream aborts the upload.
    #[tracing::instrument(skip(self))]
    pub async fn export_uploads(&self, search_query: &str) -> Result<ExportReport, AppError> {
        let mut records = Box::pin(self.store.search_by_name(search_query).peekable());

        // Fail before any upload attempt when the query cannot start.
        if matches!(records.as_mut().peek().await, Some(Err(_))) {
            if let Some(Err(err)) = records.next().await {
                return Err(err);
            }
        }

        let report_name = format!("{}.csv", Uuid::new_v4());
        let stored = self
            .storage
            .put(&report_name, "text/csv", Box::pin(encode_csv(records)))
            .await?;

        tracing::info!(key = %stored.key, "Export report uploaded");
        Ok(ExportReport {
            report_url: stored.url,
        })
    }
}
