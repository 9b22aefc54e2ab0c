//! Scheduled degradation pass.

use std::sync::Arc;

use questlog_core::{Settings, Time};
use questlog_progression::degradation::{self, DegradationOutcome};
use questlog_storage::UserRepository;

use crate::TrackerError;

/// Applies due degradation to the stored user profile.
pub struct DegradationService {
    users: Arc<dyn UserRepository>,
}

impl DegradationService {
    /// Create a new degradation service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Run one degradation pass at `now`.
    ///
    /// Loads the user, applies every due category, and persists only
    /// when something changed. The outcome is returned either way so
    /// notification consumers can inspect what happened.
    pub async fn run(
        &self,
        now: Time,
        settings: &Settings,
    ) -> Result<DegradationOutcome, TrackerError> {
        let user = self
            .users
            .get_current_user()
            .await
            .map_err(TrackerError::Persistence)?
            .ok_or_else(|| TrackerError::NotFound("no user profile exists".into()))?;

        let outcome = degradation::apply_degradation(&user, now, settings);
        if !outcome.is_noop() {
            self.users
                .update_user(&outcome.user)
                .await
                .map_err(TrackerError::Persistence)?;
            tracing::info!("degradation applied to {} categories", outcome.applied.len());
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use chrono::{Duration, Utc};
    use questlog_core::{ActivityType, Category, StatType, User};

    #[tokio::test]
    async fn run_applies_and_persists_due_degradation() {
        let store = Arc::new(MemoryStore::default());
        let now = Utc::now();
        let mut user = User::new(now - Duration::days(60));
        user.stats.insert(StatType::Strength, 3.0);
        user.last_activity
            .insert(ActivityType::WorkoutCore, now - Duration::days(7));
        store.put_user(user);

        let service = DegradationService::new(store.clone());
        let outcome = service.run(now, &Settings::default()).await.unwrap();

        assert!((outcome.applied[&Category::Workout] + 0.02).abs() < 1e-12);
        assert!((store.user().stat(StatType::Strength) - 2.98).abs() < 1e-12);
        assert_eq!(store.user_saves(), 1);

        // A second pass in the same period changes nothing and skips
        // the save entirely.
        let again = service.run(now, &Settings::default()).await.unwrap();
        assert!(again.is_noop());
        assert_eq!(store.user_saves(), 1);
    }

    #[tokio::test]
    async fn run_without_profile_is_not_found() {
        let store = Arc::new(MemoryStore::default());
        let service = DegradationService::new(store.clone());
        let err = service.run(Utc::now(), &Settings::default()).await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }
}
