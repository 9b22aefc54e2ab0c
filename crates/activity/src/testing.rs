//! In-memory repositories with scriptable failures, for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use questlog_core::{ActivityId, ActivityLogEntry, User};
use questlog_storage::{ActivityRepository, Result, StorageError, UserRepository};

/// In-memory store implementing both repositories.
///
/// Failures are injected per call site: `fail_user_saves_from(n)` makes
/// the n-th and later `update_user` attempts fail (1-based), which is
/// how the rollback paths are exercised.
#[derive(Default)]
pub struct MemoryStore {
    user: Mutex<Option<User>>,
    entries: Mutex<HashMap<ActivityId, ActivityLogEntry>>,
    user_save_attempts: Mutex<u32>,
    fail_user_saves_from: Mutex<Option<u32>>,
    fail_deletes: Mutex<bool>,
    fail_entry_saves: Mutex<bool>,
    fail_reads: Mutex<bool>,
}

impl MemoryStore {
    pub fn put_user(&self, user: User) {
        *self.user.lock().unwrap() = Some(user);
    }

    pub fn clear_user(&self) {
        *self.user.lock().unwrap() = None;
    }

    pub fn user(&self) -> User {
        self.user.lock().unwrap().clone().expect("no user seeded")
    }

    pub fn put_entry(&self, entry: ActivityLogEntry) {
        self.entries.lock().unwrap().insert(entry.id, entry);
    }

    pub fn entry(&self, id: ActivityId) -> Option<ActivityLogEntry> {
        self.entries.lock().unwrap().get(&id).cloned()
    }

    pub fn user_saves(&self) -> u32 {
        *self.user_save_attempts.lock().unwrap()
    }

    pub fn fail_user_saves_from(&self, attempt: u32) {
        *self.fail_user_saves_from.lock().unwrap() = Some(attempt);
    }

    pub fn fail_deletes(&self) {
        *self.fail_deletes.lock().unwrap() = true;
    }

    pub fn fail_entry_saves(&self) {
        *self.fail_entry_saves.lock().unwrap() = true;
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    fn check_read(&self) -> Result<()> {
        if *self.fail_reads.lock().unwrap() {
            return Err(StorageError::Other("injected read failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_current_user(&self) -> Result<Option<User>> {
        self.check_read()?;
        Ok(self.user.lock().unwrap().clone())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut attempts = self.user_save_attempts.lock().unwrap();
        *attempts += 1;
        if let Some(from) = *self.fail_user_saves_from.lock().unwrap() {
            if *attempts >= from {
                return Err(StorageError::Other("injected save failure".into()));
            }
        }
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn save(&self, entry: &ActivityLogEntry) -> Result<()> {
        if *self.fail_entry_saves.lock().unwrap() {
            return Err(StorageError::Other("injected entry save failure".into()));
        }
        self.entries.lock().unwrap().insert(entry.id, entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<ActivityLogEntry>> {
        self.check_read()?;
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ActivityLogEntry>> {
        self.check_read()?;
        let mut entries: Vec<_> = self.entries.lock().unwrap().values().cloned().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn delete(&self, id: ActivityId) -> Result<()> {
        if *self.fail_deletes.lock().unwrap() {
            return Err(StorageError::Other("injected delete failure".into()));
        }
        match self.entries.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(id.to_string())),
        }
    }
}
