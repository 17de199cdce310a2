use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded upload: one row per object successfully written to storage.
///
/// Records are immutable once created. `remote_key` is the sink-assigned
/// object key and is unique across all records; the store enforces the
/// constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: Uuid,
    pub name: String,
    pub remote_key: String,
    pub remote_url: String,
    pub created_at: DateTime<Utc>,
}

impl Upload {
    /// Build a new record with a fresh id and a server-assigned timestamp.
    pub fn new(
        name: impl Into<String>,
        remote_key: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> Self {
        Upload {
            id: Uuid::new_v4(),
            name: name.into(),
            remote_key: remote_key.into(),
            remote_url: remote_url.into(),
            created_at: Utc::now(),
        }
    }
}
