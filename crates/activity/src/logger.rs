//! Forward activity logging.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use questlog_core::{ActivityLogEntry, ActivityType, StatType, Time, User};
use questlog_progression::{exp, gains, stats};
use questlog_storage::{ActivityRepository, UserRepository};
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Result of logging an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogOutcome {
    /// The entry that was created
    pub entry: ActivityLogEntry,

    /// Stat gains that were applied
    pub stat_gains: HashMap<StatType, f64>,

    /// EXP that was awarded
    pub exp_gained: f64,

    /// Whether the award cleared at least one level
    pub leveled_up: bool,

    /// The user's level after the award
    pub new_level: u32,
}

/// Records activities and applies their progression effects.
pub struct ActivityLogger {
    users: Arc<dyn UserRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl ActivityLogger {
    /// Create a new logger.
    pub fn new(users: Arc<dyn UserRepository>, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { users, activities }
    }

    /// Log an activity: compute gains and EXP, apply them to the user,
    /// and persist both the user and the new log entry.
    ///
    /// A first log with no existing profile creates one. The user is
    /// saved before the entry; if the entry save fails the pre-gain
    /// snapshot is restored, mirroring the deletion flow's discipline.
    pub async fn log_activity(
        &self,
        activity: ActivityType,
        duration_minutes: i64,
        timestamp: Time,
    ) -> Result<LogOutcome, TrackerError> {
        if timestamp > Utc::now() {
            return Err(TrackerError::Validation(
                "activity timestamp is in the future".into(),
            ));
        }

        let stat_gains = gains::calculate_gains(activity, duration_minutes)?;
        let exp_gained = gains::calculate_exp(activity, duration_minutes)?;

        let original = self
            .users
            .get_current_user()
            .await
            .map_err(TrackerError::Persistence)?
            .unwrap_or_else(|| User::new(timestamp));

        let exp_change = exp::add_exp(original.level, original.current_exp, exp_gained)?;
        let grown = stats::apply_gains(&original.stats, &stat_gains);
        let (sanitized, warnings) = stats::validate_stats(&grown);
        for warning in &warnings {
            tracing::warn!(
                "stat {} value {} flagged during sanitization: {:?}",
                warning.stat,
                warning.value,
                warning.kind
            );
        }

        let mut new_user = original.clone();
        new_user.stats = sanitized;
        new_user.level = exp_change.new_level;
        new_user.current_exp = exp_change.new_exp;
        let last = new_user
            .last_activity
            .get(&activity)
            .copied()
            .map_or(timestamp, |t| t.max(timestamp));
        new_user.last_activity.insert(activity, last);
        new_user.updated_at = Utc::now();

        let entry = ActivityLogEntry::new(
            activity,
            duration_minutes,
            timestamp,
            stat_gains.clone(),
            exp_gained,
        );

        self.users
            .update_user(&new_user)
            .await
            .map_err(TrackerError::Persistence)?;

        if let Err(cause) = self.activities.save(&entry).await {
            tracing::warn!("entry save failed after user save, rolling back: {cause}");
            return match self.users.update_user(&original).await {
                Ok(()) => Err(TrackerError::Persistence(cause)),
                Err(rollback) => Err(TrackerError::RollbackFailed { cause, rollback }),
            };
        }

        let leveled_up = exp_change.levels_changed > 0;
        tracing::info!(
            "logged {} for {} min, +{:.1} EXP{}",
            activity,
            duration_minutes,
            exp_gained,
            if leveled_up { ", leveled up" } else { "" },
        );

        Ok(LogOutcome {
            entry,
            stat_gains,
            exp_gained,
            leveled_up,
            new_level: exp_change.new_level,
        })
    }
}
