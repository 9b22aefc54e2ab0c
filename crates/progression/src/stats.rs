//! Stat application, reversal, and sanitization.
//!
//! Stats have no semantic ceiling; they grow without bound. The
//! sanitization here is a boundary against what numeric storage, chart
//! rendering, and export formats can represent, not a game-design cap.

use std::collections::HashMap;

use questlog_core::{ActivityType, StatType, STAT_FLOOR};
use serde::{Deserialize, Serialize};

use crate::gains::calculate_gains;
use crate::EngineError;

/// Values above this are clamped during sanitization.
pub const SAFETY_CEILING: f64 = 999_999.0;

/// Values above this draw a performance warning but are preserved.
pub const PERFORMANCE_WARNING_THRESHOLD: f64 = 100_000.0;

/// Why a stat value was flagged during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatWarningKind {
    /// NaN replaced with the floor
    NotANumber,
    /// Value below the floor raised to it
    BelowFloor,
    /// Infinite or above the safety ceiling, clamped
    AboveCeiling,
    /// Unusually large but valid; charts and exports may struggle
    Performance,
}

/// A non-fatal issue found while validating stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatWarning {
    /// Which stat was flagged
    pub stat: StatType,
    /// The value as stored, before any replacement
    pub value: f64,
    /// What was wrong with it
    pub kind: StatWarningKind,
}

/// Add gains onto current stats.
///
/// Stats absent from `current` start at the floor before the gain is
/// added. No ceiling applies.
pub fn apply_gains(
    current: &HashMap<StatType, f64>,
    gains: &HashMap<StatType, f64>,
) -> HashMap<StatType, f64> {
    let mut new_stats = current.clone();
    for (stat, gain) in gains {
        let base = current.get(stat).copied().unwrap_or(STAT_FLOOR);
        new_stats.insert(*stat, base + gain);
    }
    new_stats
}

/// The stat amounts to subtract when deleting an activity entry.
///
/// Stored gains are used verbatim when present, since they are exactly
/// what was applied at log time. Legacy entries without stored gains
/// fall back to recomputing from the current rate table.
pub fn calculate_reversals(
    activity: ActivityType,
    duration_minutes: i64,
    stored_gains: &HashMap<StatType, f64>,
) -> Result<HashMap<StatType, f64>, EngineError> {
    if !stored_gains.is_empty() {
        return Ok(stored_gains.clone());
    }
    calculate_gains(activity, duration_minutes)
}

/// Subtract reversals from current stats, clamping at the floor.
///
/// Stats not named in `reversals` are unchanged. The clamp is lossy on
/// purpose: once a stat hits the floor the pre-gain value is gone, so
/// reversal is idempotent at the floor rather than a true inverse.
pub fn apply_reversals(
    current: &HashMap<StatType, f64>,
    reversals: &HashMap<StatType, f64>,
) -> HashMap<StatType, f64> {
    let mut new_stats = current.clone();
    for (stat, reversal) in reversals {
        let base = current.get(stat).copied().unwrap_or(STAT_FLOOR);
        new_stats.insert(*stat, (base - reversal).max(STAT_FLOOR));
    }
    new_stats
}

/// Sanitize stats for storage and rendering.
///
/// NaN and sub-floor values are replaced with the floor; infinities and
/// values above [`SAFETY_CEILING`] are clamped to the ceiling; values in
/// the high-but-finite band are preserved and flagged. Every output
/// value is finite and within `[1.0, 999_999]`.
pub fn validate_stats(
    stats: &HashMap<StatType, f64>,
) -> (HashMap<StatType, f64>, Vec<StatWarning>) {
    let mut sanitized = HashMap::with_capacity(stats.len());
    let mut warnings = Vec::new();

    for (stat, value) in stats {
        let (clean, kind) = if value.is_nan() {
            (STAT_FLOOR, Some(StatWarningKind::NotANumber))
        } else if *value < STAT_FLOOR {
            (STAT_FLOOR, Some(StatWarningKind::BelowFloor))
        } else if *value > SAFETY_CEILING {
            (SAFETY_CEILING, Some(StatWarningKind::AboveCeiling))
        } else if *value > PERFORMANCE_WARNING_THRESHOLD {
            (*value, Some(StatWarningKind::Performance))
        } else {
            (*value, None)
        };

        if let Some(kind) = kind {
            warnings.push(StatWarning {
                stat: *stat,
                value: *value,
                kind,
            });
        }
        sanitized.insert(*stat, clean);
    }

    (sanitized, warnings)
}

/// Upper bound for stat charts: the max stat rounded up to the next
/// multiple of 5, or 5 when every stat fits under it.
pub fn recommended_chart_max(stats: &HashMap<StatType, f64>) -> f64 {
    let max = stats.values().copied().fold(0.0f64, f64::max);
    if max <= 5.0 {
        return 5.0;
    }
    (max / 5.0).ceil() * 5.0
}
