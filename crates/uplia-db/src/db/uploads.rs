//! Upload repository: insert and streaming search over the uploads table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::{PgPool, Postgres};
use uplia_core::{AppError, Upload};
use uuid::Uuid;

/// Row type for the uploads table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct UploadRow {
    id: Uuid,
    name: String,
    remote_key: String,
    remote_url: String,
    created_at: DateTime<Utc>,
}

impl UploadRow {
    fn into_upload(self) -> Upload {
        Upload {
            id: self.id,
            name: self.name,
            remote_key: self.remote_key,
            remote_url: self.remote_url,
            created_at: self.created_at,
        }
    }
}

/// Metadata store contract for upload records.
///
/// Implementations must be safe for concurrent use; the Postgres
/// implementation shares a connection pool.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Insert a new upload record.
    ///
    /// A duplicate `remote_key` is rejected as [`AppError::Conflict`].
    async fn insert(&self, upload: &Upload) -> Result<(), AppError>;

    /// Lazily stream records whose name contains `search_query`.
    ///
    /// An empty query matches all records. Rows are fetched from the store
    /// one at a time as the stream is polled; a read error mid-sequence
    /// surfaces as a stream item. Dropping the stream releases the
    /// underlying cursor.
    fn search_by_name(&self, search_query: &str) -> BoxStream<'static, Result<Upload, AppError>>;
}

/// Postgres-backed repository for the uploads table.
#[derive(Clone)]
pub struct PgUploadStore {
    pool: PgPool,
}

impl PgUploadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for PgUploadStore {
    #[tracing::instrument(skip(self, upload), fields(db.table = "uploads", db.record_id = %upload.id))]
    async fn insert(&self, upload: &Upload) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO uploads (id, name, remote_key, remote_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(upload.id)
        .bind(&upload.name)
        .bind(&upload.remote_key)
        .bind(&upload.remote_url)
        .bind(upload.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!(
                    "remote_key already exists: {}",
                    upload.remote_key
                ))
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(())
    }

    fn search_by_name(&self, search_query: &str) -> BoxStream<'static, Result<Upload, AppError>> {
        let pool = self.pool.clone();
        let pattern = like_pattern(search_query);

        // Row order is store-defined; created_at/id keeps it deterministic
        // for a given store state.
        Box::pin(async_stream::try_stream! {
            let mut rows = sqlx::query_as::<Postgres, UploadRow>(
                r#"
                SELECT id, name, remote_key, remote_url, created_at
                FROM uploads
                WHERE name ILIKE $1
                ORDER BY created_at, id
                "#,
            )
            .bind(pattern)
            .fetch(&pool);

            while let Some(row) = rows.try_next().await? {
                yield row.into_upload();
            }
        })
    }
}

/// Build an ILIKE pattern matching `query` as a substring, with LIKE
/// metacharacters escaped. An empty query yields `%%` and matches all rows.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
