//! Repository trait abstractions.

use async_trait::async_trait;
use questlog_core::{ActivityId, ActivityLogEntry, User};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Access to the single user profile.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load the current user, if a profile exists.
    async fn get_current_user(&self) -> Result<Option<User>>;

    /// Save the user profile (create or update).
    async fn update_user(&self, user: &User) -> Result<()>;
}

/// Access to the activity log.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Save an activity log entry (create or update).
    async fn save(&self, entry: &ActivityLogEntry) -> Result<()>;

    /// Load an entry by ID.
    async fn find_by_id(&self, id: ActivityId) -> Result<Option<ActivityLogEntry>>;

    /// List all entries, newest first.
    async fn find_all(&self) -> Result<Vec<ActivityLogEntry>>;

    /// Delete an entry.
    async fn delete(&self, id: ActivityId) -> Result<()>;
}
