//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Tunable engine settings, persisted as `config.json` in the data
/// directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Exclude Saturdays and Sundays when counting inactive days
    pub relaxed_weekend: bool,

    /// Whole days of inactivity before a category starts to degrade
    pub degradation_threshold_days: i64,

    /// Stat loss per complete threshold period
    pub degradation_per_period: f64,

    /// Largest stat loss a single degradation application may inflict
    pub degradation_cap: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relaxed_weekend: false,
            degradation_threshold_days: 3,
            degradation_per_period: 0.01,
            degradation_cap: 0.05,
        }
    }
}
