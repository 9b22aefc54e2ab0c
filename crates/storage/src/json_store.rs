//! JSON file storage implementation.
//!
//! Stores the user profile and activity log as JSON files in a
//! `.questlog` directory: `user.json`, `config.json`, and one file per
//! log entry under `activities/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use questlog_core::{ActivityId, ActivityLogEntry, Settings, User};
use tokio::fs;

use super::{ActivityRepository, Result, StorageError, UserRepository};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create storage. This will create the data directory and its
    /// `activities/` subdirectory if they do not exist yet.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("activities")).await?;
        Ok(Self { root })
    }

    fn user_path(&self) -> PathBuf {
        self.root.join("user.json")
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    fn activity_path(&self, id: ActivityId) -> PathBuf {
        self.root.join("activities").join(format!("{}.json", id))
    }

    /// Load settings, falling back to defaults when `config.json` is
    /// missing.
    pub async fn load_settings(&self) -> Result<Settings> {
        Ok(read_json(&self.settings_path()).await?.unwrap_or_default())
    }

    /// Persist settings to `config.json`.
    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_path(), json.as_bytes()).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for JsonStore {
    async fn get_current_user(&self) -> Result<Option<User>> {
        read_json(&self.user_path()).await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string_pretty(user)?;
        fs::write(self.user_path(), json.as_bytes()).await?;
        tracing::debug!("saved user profile (level {})", user.level);
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for JsonStore {
    async fn save(&self, entry: &ActivityLogEntry) -> Result<()> {
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(self.activity_path(entry.id), json.as_bytes()).await?;
        tracing::debug!("saved activity entry {}", entry.id);
        Ok(())
    }

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<ActivityLogEntry>> {
        read_json(&self.activity_path(id)).await
    }

    async fn find_all(&self) -> Result<Vec<ActivityLogEntry>> {
        let mut entries: Vec<ActivityLogEntry> = Vec::new();
        let mut dir = fs::read_dir(self.root.join("activities")).await?;
        while let Some(file) = dir.next_entry().await? {
            if file.path().extension().is_some_and(|ext| ext == "json") {
                if let Some(entry) = read_json(&file.path()).await? {
                    entries.push(entry);
                }
            }
        }
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn delete(&self, id: ActivityId) -> Result<()> {
        let path = self.activity_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Read a JSON file, returning None when it does not exist.
async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(serde_json::from_str(&s)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
