//! Transactional activity deletion with stat and EXP reversal.
//!
//! Deleting a logged activity must leave the user as if the entry had
//! never existed, modulo the stat floor. The flow is a small state
//! machine: validate, compute on a retained snapshot, then persist in
//! two sequential phases with rollback on partial failure. The user is
//! always saved before the entry is deleted, so a crash between the two
//! phases leaves corrected stats plus a stale log entry, which is a
//! recoverable state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use questlog_core::{ActivityId, ActivityLogEntry, StatType, User};
use questlog_progression::{exp, stats};
use questlog_storage::{ActivityRepository, UserRepository};
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Result of a successful activity deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalOutcome {
    /// The entry that was deleted
    pub activity: ActivityLogEntry,

    /// Stat amounts that were subtracted
    pub stat_reversals: HashMap<StatType, f64>,

    /// EXP that was reversed
    pub exp_reversed: f64,

    /// Whether the reversal cost at least one level
    pub leveled_down: bool,

    /// The user's level after the reversal
    pub new_level: u32,
}

/// Dry-run of a deletion, for confirmation dialogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalPreview {
    /// Stat amounts that would be subtracted
    pub stat_reversals: HashMap<StatType, f64>,

    /// EXP that would be reversed
    pub exp_reversed: f64,

    /// Whether the reversal would cost at least one level
    pub will_level_down: bool,

    /// Level after the reversal
    pub new_level: u32,

    /// EXP after the reversal
    pub new_exp: f64,
}

struct Computed {
    new_user: User,
    reversals: HashMap<StatType, f64>,
    exp_change: exp::ExpChange,
}

/// Orchestrates activity deletion across the repositories.
pub struct ReversalCoordinator {
    users: Arc<dyn UserRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl ReversalCoordinator {
    /// Create a new coordinator.
    pub fn new(users: Arc<dyn UserRepository>, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { users, activities }
    }

    /// Delete an activity entry and reverse its effects on the user.
    pub async fn delete_activity(&self, id: &str) -> Result<ReversalOutcome, TrackerError> {
        let (user, entry) = self.load_and_validate(id).await?;
        let computed = compute_reversal(&user, &entry)?;

        // Phase 1: persist the corrected user. On failure nothing has
        // changed yet and the error is plainly retryable.
        self.users
            .update_user(&computed.new_user)
            .await
            .map_err(TrackerError::Persistence)?;

        // Phase 2: delete the entry. On failure, restore the retained
        // snapshot; a failed restore is the one fatal outcome.
        if let Err(cause) = self.activities.delete(entry.id).await {
            tracing::warn!("activity delete failed after user save, rolling back: {cause}");
            return match self.users.update_user(&user).await {
                Ok(()) => Err(TrackerError::Persistence(cause)),
                Err(rollback) => Err(TrackerError::RollbackFailed { cause, rollback }),
            };
        }

        let leveled_down = computed.exp_change.levels_changed > 0;
        tracing::info!(
            "deleted activity {} ({}), reversed {:.1} EXP{}",
            entry.id,
            entry.activity_type,
            entry.exp_gained,
            if leveled_down { ", leveled down" } else { "" },
        );

        Ok(ReversalOutcome {
            stat_reversals: computed.reversals,
            exp_reversed: entry.exp_gained,
            leveled_down,
            new_level: computed.exp_change.new_level,
            activity: entry,
        })
    }

    /// Compute what deleting an entry would do, without touching
    /// anything.
    pub async fn preview_deletion(&self, id: &str) -> Result<ReversalPreview, TrackerError> {
        let (user, entry) = self.load_and_validate(id).await?;
        let computed = compute_reversal(&user, &entry)?;

        Ok(ReversalPreview {
            stat_reversals: computed.reversals,
            exp_reversed: entry.exp_gained,
            will_level_down: computed.exp_change.levels_changed > 0,
            new_level: computed.exp_change.new_level,
            new_exp: computed.exp_change.new_exp,
        })
    }

    async fn load_and_validate(&self, id: &str) -> Result<(User, ActivityLogEntry), TrackerError> {
        if id.trim().is_empty() {
            return Err(TrackerError::Validation("activity id is empty".into()));
        }
        let id: ActivityId = id
            .parse()
            .map_err(|_| TrackerError::Validation(format!("malformed activity id: {id}")))?;

        let entry = self
            .activities
            .find_by_id(id)
            .await
            .map_err(TrackerError::Persistence)?
            .ok_or_else(|| TrackerError::NotFound(format!("activity {id}")))?;

        let user = self
            .users
            .get_current_user()
            .await
            .map_err(TrackerError::Persistence)?
            .ok_or_else(|| TrackerError::NotFound("no user profile exists".into()))?;

        validate_entry(&entry)?;

        Ok((user, entry))
    }
}

/// Check a stored entry against the domain invariants before acting on
/// it.
fn validate_entry(entry: &ActivityLogEntry) -> Result<(), TrackerError> {
    if entry.duration_minutes < 0 {
        return Err(TrackerError::Inconsistent(format!(
            "activity {} has negative duration {}",
            entry.id, entry.duration_minutes
        )));
    }
    if !entry.exp_gained.is_finite() || entry.exp_gained < 0.0 {
        return Err(TrackerError::Inconsistent(format!(
            "activity {} has invalid stored EXP {}",
            entry.id, entry.exp_gained
        )));
    }
    if entry.stat_gains.values().any(|v| v.is_nan()) {
        return Err(TrackerError::Inconsistent(format!(
            "activity {} has NaN in stored stat gains",
            entry.id
        )));
    }
    if entry.timestamp > Utc::now() {
        return Err(TrackerError::Inconsistent(format!(
            "activity {} is timestamped in the future",
            entry.id
        )));
    }
    Ok(())
}

fn compute_reversal(user: &User, entry: &ActivityLogEntry) -> Result<Computed, TrackerError> {
    let reversals =
        stats::calculate_reversals(entry.activity_type, entry.duration_minutes, &entry.stat_gains)?;
    let exp_change = exp::reverse_exp(user.level, user.current_exp, entry.exp_gained)?;

    let mut new_user = user.clone();
    new_user.stats = stats::apply_reversals(&user.stats, &reversals);
    new_user.level = exp_change.new_level;
    new_user.current_exp = exp_change.new_exp;
    new_user.updated_at = Utc::now();

    Ok(Computed {
        new_user,
        reversals,
        exp_change,
    })
}
