//! Test doubles for the pipelines: an in-memory metadata store and a
//! recording stub sink. Both are injected through the same traits the
//! production adapters implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{stream, TryStreamExt};
use std::sync::{Arc, Mutex};
use uplia_core::{AppError, StorageBackend, Upload};
use uplia_db::UploadStore;
use uplia_services::{ByteStream, Storage, StorageError, StorageResult, StoredObject};

/// In-memory metadata store with the same uniqueness behavior as Postgres.
#[derive(Clone, Default)]
pub struct MemoryUploadStore {
    rows: Arc<Mutex<Vec<Upload>>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Upload> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn insert(&self, upload: &Upload) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.remote_key == upload.remote_key) {
            return Err(AppError::Conflict(format!(
                "remote_key already exists: {}",
                upload.remote_key
            )));
        }
        rows.push(upload.clone());
        Ok(())
    }

    fn search_by_name(&self, search_query: &str) -> BoxStream<'static, Result<Upload, AppError>> {
        let matches: Vec<Result<Upload, AppError>> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.contains(search_query))
            .cloned()
            .map(Ok)
            .collect();
        Box::pin(stream::iter(matches))
    }
}

/// Store whose search yields a scripted sequence of results, for failure
/// injection. The script is consumed by the first search.
pub struct ScriptedStore {
    items: Mutex<Option<Vec<Result<Upload, AppError>>>>,
}

impl ScriptedStore {
    pub fn new(items: Vec<Result<Upload, AppError>>) -> Self {
        Self {
            items: Mutex::new(Some(items)),
        }
    }
}

#[async_trait]
impl UploadStore for ScriptedStore {
    async fn insert(&self, _upload: &Upload) -> Result<(), AppError> {
        Ok(())
    }

    fn search_by_name(&self, _search_query: &str) -> BoxStream<'static, Result<Upload, AppError>> {
        let items = self.items.lock().unwrap().take().unwrap_or_default();
        Box::pin(stream::iter(items))
    }
}

/// One recorded, fully drained call to [`RecordingStorage::put`].
#[derive(Debug, Clone)]
pub struct PutCall {
    pub filename: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Stub sink: drains the content stream and records each successful `put`.
pub struct RecordingStorage {
    url: String,
    fixed_key: Option<String>,
    fail_put: bool,
    calls: Mutex<Vec<PutCall>>,
}

impl RecordingStorage {
    /// A sink whose successful puts all resolve to `url`.
    pub fn returning(url: &str) -> Self {
        Self {
            url: url.to_string(),
            fixed_key: None,
            fail_put: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A sink that hands out the same key on every put, to provoke
    /// store-level conflicts.
    pub fn with_fixed_key(url: &str, key: &str) -> Self {
        Self {
            fixed_key: Some(key.to_string()),
            ..Self::returning(url)
        }
    }

    /// A sink that rejects every put.
    pub fn failing() -> Self {
        Self {
            fail_put: true,
            ..Self::returning("https://unused.example")
        }
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        mut content: ByteStream,
    ) -> StorageResult<StoredObject> {
        if self.fail_put {
            return Err(StorageError::UploadFailed("stub sink failure".to_string()));
        }

        let mut body = Vec::new();
        loop {
            match content.try_next().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => return Err(StorageError::StreamAborted(e.to_string())),
            }
        }

        self.calls.lock().unwrap().push(PutCall {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            body,
        });

        let key = self
            .fixed_key
            .clone()
            .unwrap_or_else(|| format!("stub/{}", filename));
        Ok(StoredObject {
            key,
            url: self.url.clone(),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Single-pass byte stream over fixed chunks.
pub fn byte_stream(chunks: Vec<&'static [u8]>) -> ByteStream {
    Box::pin(stream::iter(
        chunks.into_iter().map(|c| Ok(Bytes::from_static(c))),
    ))
}

pub fn empty_stream() -> ByteStream {
    byte_stream(vec![])
}
