//! Activity log entry - one logged real-world activity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityType;
use crate::id::ActivityId;
use crate::stat::StatType;
use crate::Time;

/// A logged activity and the exact progression effects it had.
///
/// Created when an activity is logged, destroyed when it is deleted.
/// Deleting an entry must leave the user's stats and EXP as if the
/// entry had never been logged, modulo the stat floor clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Unique identifier
    pub id: ActivityId,

    /// What kind of activity this was
    pub activity_type: ActivityType,

    /// How long it lasted, in minutes.
    ///
    /// Signed so that malformed stored data surfaces as a validation
    /// failure instead of wrapping.
    pub duration_minutes: i64,

    /// When the activity happened; never in the future
    pub timestamp: Time,

    /// The exact stat gains applied when this entry was logged.
    ///
    /// Empty for legacy entries recorded before the field existed;
    /// reversal falls back to recomputing from the rate table.
    #[serde(default)]
    pub stat_gains: HashMap<StatType, f64>,

    /// EXP granted when this entry was logged, >= 0
    pub exp_gained: f64,
}

impl ActivityLogEntry {
    /// Create a new entry with a fresh id.
    pub fn new(
        activity_type: ActivityType,
        duration_minutes: i64,
        timestamp: Time,
        stat_gains: HashMap<StatType, f64>,
        exp_gained: f64,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            activity_type,
            duration_minutes,
            timestamp,
            stat_gains,
            exp_gained,
        }
    }
}
