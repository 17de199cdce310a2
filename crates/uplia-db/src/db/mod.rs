//! Database repositories for the data access layer
//!
//! The uploads repository is responsible for the `uploads` table and provides
//! an insert plus a streaming name search. Pool construction and migrations
//! live here as well.

pub mod uploads;

pub use uploads::{PgUploadStore, UploadStore};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uplia_core::{AppError, Config};

/// Build a Postgres connection pool from configuration.
pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Apply the embedded migration set.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))
}
