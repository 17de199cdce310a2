//! Upload pipeline: write the content stream to storage, then record
//! metadata.

use std::sync::Arc;
use uplia_core::{AppError, Upload};
use uplia_db::UploadStore;
use uplia_storage::{ByteStream, Storage};

/// Orchestrates file uploads: storage write first, metadata insert second.
///
/// The two steps are not transactional. A successful storage write followed
/// by a failed insert leaves an orphaned object behind; the orphan is logged
/// and the caller sees the insert failure. No retries on either step.
#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn UploadStore>,
    storage: Arc<dyn Storage>,
}

impl UploadService {
    pub fn new(store: Arc<dyn UploadStore>, storage: Arc<dyn Storage>) -> Self {
        Self { store, storage }
    }

    /// Upload a file and record its metadata.
    ///
    /// The content stream is forwarded to storage unchanged and consumed
    /// once. If the storage write fails the store is never touched.
    #[tracing::instrument(skip(self, content), fields(file_name = %file_name))]
    pub async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        content: ByteStream,
    ) -> Result<Upload, AppError> {
        if file_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }

        let stored = self.storage.put(file_name, content_type, content).await?;

        let upload = Upload::new(file_name, stored.key, stored.url);
        if let Err(err) = self.store.insert(&upload).await {
            tracing::warn!(
                key = %upload.remote_key,
                error = %err,
                "Metadata insert failed after storage write; stored object is orphaned"
            );
            return Err(err);
        }

        tracing::info!(upload_id = %upload.id, key = %upload.remote_key, "Upload recorded");
        Ok(upload)
    }
}
