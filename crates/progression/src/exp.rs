//! EXP and level arithmetic.
//!
//! Levels form a one-dimensional state machine: the only transitions
//! are single-step increments (level-up) and decrements (level-down),
//! applied in a loop so one call handles arbitrarily large EXP deltas.
//! Level 1 is absorbing on the downward side.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// EXP required to clear level 1.
pub const BASE_THRESHOLD: f64 = 1000.0;

/// Per-level growth factor of the threshold.
pub const THRESHOLD_GROWTH: f64 = 1.2;

/// Result of adding or reversing EXP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpChange {
    /// Level after the change, always >= 1
    pub new_level: u32,

    /// EXP after the change; `0 <= new_exp < threshold(new_level)`
    pub new_exp: f64,

    /// How many levels were gained (or lost, for a reversal)
    pub levels_changed: u32,
}

/// Non-mutating preview of an EXP reversal, for confirmation dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDownPreview {
    /// Whether the reversal would cost at least one level
    pub will_level_down: bool,

    /// Level after the reversal
    pub new_level: u32,

    /// EXP after the reversal
    pub new_exp: f64,

    /// Levels that would be lost
    pub levels_lost: u32,
}

/// EXP required to advance from `level` to `level + 1`.
///
/// `1000 * 1.2^(level-1)`; monotonically increasing, finite for any
/// practical level.
pub fn threshold(level: u32) -> Result<f64, EngineError> {
    if level < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "level must be >= 1, got {level}"
        )));
    }
    Ok(BASE_THRESHOLD * THRESHOLD_GROWTH.powi(level as i32 - 1))
}

/// Add EXP, rolling over as many level-ups as the gain covers.
pub fn add_exp(level: u32, current_exp: f64, gain: f64) -> Result<ExpChange, EngineError> {
    if !gain.is_finite() || gain < 0.0 {
        return Err(EngineError::InvalidArgument(format!(
            "EXP gain must be finite and >= 0, got {gain}"
        )));
    }

    let mut new_level = level;
    let mut new_exp = current_exp + gain;
    let mut levels_changed = 0;

    let mut needed = threshold(new_level)?;
    while new_exp >= needed {
        new_exp -= needed;
        new_level += 1;
        levels_changed += 1;
        needed = threshold(new_level)?;
    }

    Ok(ExpChange {
        new_level,
        new_exp,
        levels_changed,
    })
}

/// Subtract EXP, undoing level-ups one step at a time.
///
/// While the running total is negative and the level is above 1, the
/// previous level's threshold is added back and the level decremented.
/// If the total is still negative at level 1 it clamps to 0; the engine
/// never reports level 0 or negative EXP.
pub fn reverse_exp(level: u32, current_exp: f64, amount: f64) -> Result<ExpChange, EngineError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::InvalidArgument(format!(
            "EXP reversal must be finite and >= 0, got {amount}"
        )));
    }
    if level < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "level must be >= 1, got {level}"
        )));
    }

    let mut new_level = level;
    let mut new_exp = current_exp - amount;
    let mut levels_changed = 0;

    while new_exp < 0.0 && new_level > 1 {
        new_level -= 1;
        new_exp += threshold(new_level)?;
        levels_changed += 1;
    }

    // Terminal floor: level 1 with a deficit clamps to zero.
    if new_exp < 0.0 {
        new_exp = 0.0;
    }

    Ok(ExpChange {
        new_level,
        new_exp,
        levels_changed,
    })
}

/// Preview what [`reverse_exp`] would do, without committing to it.
pub fn preview_level_down(
    level: u32,
    current_exp: f64,
    amount: f64,
) -> Result<LevelDownPreview, EngineError> {
    let change = reverse_exp(level, current_exp, amount)?;
    Ok(LevelDownPreview {
        will_level_down: change.levels_changed > 0,
        new_level: change.new_level,
        new_exp: change.new_exp,
        levels_lost: change.levels_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_known_values() {
        assert_eq!(threshold(1).unwrap(), 1000.0);
        assert_eq!(threshold(2).unwrap(), 1200.0);
        assert!((threshold(3).unwrap() - 1440.0).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_monotonic() {
        for level in 1..200 {
            assert!(threshold(level + 1).unwrap() > threshold(level).unwrap());
        }
    }

    #[test]
    fn threshold_rejects_level_zero() {
        assert!(matches!(threshold(0), Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn add_exp_single_level_up() {
        let change = add_exp(1, 900.0, 200.0).unwrap();
        assert_eq!(change.new_level, 2);
        assert!((change.new_exp - 100.0).abs() < 1e-9);
        assert_eq!(change.levels_changed, 1);
    }

    #[test]
    fn add_exp_multi_level_rollover() {
        // 1000 + 1200 = 2200 clears two levels from a standing start.
        let change = add_exp(1, 0.0, 2350.0).unwrap();
        assert_eq!(change.new_level, 3);
        assert!((change.new_exp - 150.0).abs() < 1e-9);
        assert_eq!(change.levels_changed, 2);
    }

    #[test]
    fn add_exp_result_invariant_holds() {
        for (level, exp, gain) in [
            (1u32, 0.0, 0.0),
            (1, 999.9, 0.1),
            (2, 500.0, 10_000.0),
            (5, 0.0, 123_456.0),
        ] {
            let change = add_exp(level, exp, gain).unwrap();
            assert!(change.new_exp >= 0.0);
            assert!(change.new_exp < threshold(change.new_level).unwrap());
        }
    }

    #[test]
    fn add_exp_rejects_negative_gain() {
        assert!(matches!(
            add_exp(1, 0.0, -1.0),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn reverse_exp_level_down_scenario() {
        // 100 - 300 = -200, borrow threshold(2) = 1200 -> 1000 at level 2.
        let change = reverse_exp(3, 100.0, 300.0).unwrap();
        assert_eq!(change.new_level, 2);
        assert!((change.new_exp - 1000.0).abs() < 1e-9);
        assert_eq!(change.levels_changed, 1);
    }

    #[test]
    fn reverse_exp_clamps_at_level_one() {
        let change = reverse_exp(1, 50.0, 500.0).unwrap();
        assert_eq!(change.new_level, 1);
        assert_eq!(change.new_exp, 0.0);
        assert_eq!(change.levels_changed, 0);
    }

    #[test]
    fn reverse_exp_multi_level_down() {
        let change = reverse_exp(3, 0.0, 2000.0).unwrap();
        // Borrows 1200 (level 2) then 1000 (level 1): -2000 + 2200 = 200.
        assert_eq!(change.new_level, 1);
        assert!((change.new_exp - 200.0).abs() < 1e-9);
        assert_eq!(change.levels_changed, 2);
    }

    #[test]
    fn reverse_exp_never_goes_negative() {
        for (level, exp, amount) in [(1u32, 0.0, 1e9), (4, 10.0, 1e9), (2, 0.0, 0.0)] {
            let change = reverse_exp(level, exp, amount).unwrap();
            assert!(change.new_level >= 1);
            assert!(change.new_exp >= 0.0);
        }
    }

    #[test]
    fn add_then_reverse_round_trips_within_a_level() {
        let added = add_exp(4, 300.0, 250.0).unwrap();
        let reversed = reverse_exp(added.new_level, added.new_exp, 250.0).unwrap();
        assert_eq!(reversed.new_level, 4);
        assert!((reversed.new_exp - 300.0).abs() < 1e-9);
    }

    #[test]
    fn add_then_reverse_round_trips_across_a_level() {
        let added = add_exp(2, 1100.0, 600.0).unwrap();
        assert_eq!(added.new_level, 3);
        let reversed = reverse_exp(added.new_level, added.new_exp, 600.0).unwrap();
        assert_eq!(reversed.new_level, 2);
        assert!((reversed.new_exp - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn preview_matches_reverse_without_mutating_anything() {
        let preview = preview_level_down(3, 100.0, 300.0).unwrap();
        assert!(preview.will_level_down);
        assert_eq!(preview.new_level, 2);
        assert!((preview.new_exp - 1000.0).abs() < 1e-9);
        assert_eq!(preview.levels_lost, 1);

        let no_change = preview_level_down(3, 100.0, 50.0).unwrap();
        assert!(!no_change.will_level_down);
        assert_eq!(no_change.new_level, 3);
    }
}
