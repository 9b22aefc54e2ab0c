//! User profile - the single progression state the engines operate on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityType, Category};
use crate::stat::{StatType, STAT_FLOOR};
use crate::Time;

/// The user's progression state.
///
/// A `User` is a value: engine operations take a snapshot by reference
/// and return a new one, never mutating in place. Holding on to the old
/// snapshot is what makes transactional rollback a plain re-save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Current level, always >= 1
    pub level: u32,

    /// EXP accumulated toward the next level.
    ///
    /// Invariant after any engine operation:
    /// `0 <= current_exp < threshold(level)`.
    pub current_exp: f64,

    /// Stat values, each finite and >= 1.0 after validation
    pub stats: HashMap<StatType, f64>,

    /// Most recent log timestamp per activity type.
    ///
    /// Read by degradation; never touched by the reversal flow.
    pub last_activity: HashMap<ActivityType, Time>,

    /// When degradation last applied, per category
    pub last_degraded: HashMap<Category, Time>,

    /// When the profile was created
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl User {
    /// Create a fresh level-1 profile with every stat at the floor.
    pub fn new(now: Time) -> Self {
        let stats = StatType::ALL.iter().map(|s| (*s, STAT_FLOOR)).collect();
        Self {
            level: 1,
            current_exp: 0.0,
            stats,
            last_activity: HashMap::new(),
            last_degraded: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current value of a stat, defaulting to the floor when unset.
    pub fn stat(&self, stat: StatType) -> f64 {
        self.stats.get(&stat).copied().unwrap_or(STAT_FLOOR)
    }

    /// Most recent activity timestamp within a category, if any.
    pub fn last_activity_in(&self, category: Category) -> Option<Time> {
        self.last_activity
            .iter()
            .filter(|(activity, _)| activity.category() == category)
            .map(|(_, ts)| *ts)
            .max()
    }
}
