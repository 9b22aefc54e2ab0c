//! Activity gain and EXP award tables.
//!
//! Each activity type maps to per-hour rates for one or two stats;
//! gains scale linearly with duration. `QuitBadHabit` is the one
//! fixed-amount exception: resisting a bad habit grants a flat focus
//! gain no matter how long (or short) the entry says it took.
//!
//! `WorkoutWeights` predates the split into upper/lower/core sessions
//! and keeps its original rates, so legacy entries without stored gains
//! reverse with the numbers they were actually granted under.

use std::collections::HashMap;

use questlog_core::{ActivityType, StatType};

use crate::EngineError;

/// Flat focus gain for resisting a bad habit, duration-independent.
pub const QUIT_BAD_HABIT_FOCUS_GAIN: f64 = 0.03;

/// Flat EXP award for resisting a bad habit.
pub const QUIT_BAD_HABIT_EXP: f64 = 100.0;

/// Per-hour stat rates for an activity type.
fn hourly_rates(activity: ActivityType) -> &'static [(StatType, f64)] {
    match activity {
        ActivityType::WorkoutUpperBody => &[(StatType::Strength, 0.06), (StatType::Endurance, 0.03)],
        ActivityType::WorkoutLowerBody => &[(StatType::Agility, 0.06), (StatType::Endurance, 0.03)],
        ActivityType::WorkoutCore => &[(StatType::Strength, 0.04), (StatType::Endurance, 0.05)],
        ActivityType::WorkoutCardio => &[(StatType::Endurance, 0.06), (StatType::Agility, 0.03)],
        // Legacy pre-split schema, original rates.
        ActivityType::WorkoutWeights => &[(StatType::Strength, 0.05), (StatType::Endurance, 0.025)],
        ActivityType::StudySerious => &[(StatType::Intelligence, 0.06), (StatType::Focus, 0.04)],
        ActivityType::StudyCasual => &[(StatType::Intelligence, 0.03)],
        ActivityType::Meditation => &[(StatType::Focus, 0.05)],
        ActivityType::Socializing => &[(StatType::Charisma, 0.05)],
        ActivityType::QuitBadHabit | ActivityType::Other => &[],
    }
}

/// Per-hour EXP award for an activity type.
fn hourly_exp(activity: ActivityType) -> f64 {
    match activity {
        ActivityType::WorkoutUpperBody
        | ActivityType::WorkoutLowerBody
        | ActivityType::WorkoutCore
        | ActivityType::WorkoutCardio
        | ActivityType::WorkoutWeights => 300.0,
        ActivityType::StudySerious => 300.0,
        ActivityType::StudyCasual => 150.0,
        ActivityType::Meditation => 200.0,
        ActivityType::Socializing => 150.0,
        ActivityType::QuitBadHabit | ActivityType::Other => 0.0,
    }
}

fn check_duration(duration_minutes: i64) -> Result<(), EngineError> {
    if duration_minutes < 0 {
        return Err(EngineError::InvalidArgument(format!(
            "duration must be >= 0 minutes, got {duration_minutes}"
        )));
    }
    Ok(())
}

/// Stat gains for logging `activity` over `duration_minutes`.
///
/// Linear in duration for every activity except `QuitBadHabit`, which
/// returns its flat gain for any duration, including 0.
pub fn calculate_gains(
    activity: ActivityType,
    duration_minutes: i64,
) -> Result<HashMap<StatType, f64>, EngineError> {
    check_duration(duration_minutes)?;

    if activity == ActivityType::QuitBadHabit {
        let mut gains = HashMap::new();
        gains.insert(StatType::Focus, QUIT_BAD_HABIT_FOCUS_GAIN);
        return Ok(gains);
    }

    let hours = duration_minutes as f64 / 60.0;
    Ok(hourly_rates(activity)
        .iter()
        .map(|(stat, rate)| (*stat, rate * hours))
        .collect())
}

/// EXP awarded for logging `activity` over `duration_minutes`.
pub fn calculate_exp(activity: ActivityType, duration_minutes: i64) -> Result<f64, EngineError> {
    check_duration(duration_minutes)?;

    if activity == ActivityType::QuitBadHabit {
        return Ok(QUIT_BAD_HABIT_EXP);
    }

    Ok(hourly_exp(activity) * duration_minutes as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_body_two_hours() {
        let gains = calculate_gains(ActivityType::WorkoutUpperBody, 120).unwrap();
        assert_eq!(gains.len(), 2);
        assert!((gains[&StatType::Strength] - 0.12).abs() < 1e-12);
        assert!((gains[&StatType::Endurance] - 0.06).abs() < 1e-12);
    }

    #[test]
    fn gains_scale_linearly() {
        let half = calculate_gains(ActivityType::StudySerious, 30).unwrap();
        assert!((half[&StatType::Intelligence] - 0.03).abs() < 1e-12);
        assert!((half[&StatType::Focus] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn quit_bad_habit_is_flat_for_any_duration() {
        for minutes in [0, 1, 60, 480] {
            let gains = calculate_gains(ActivityType::QuitBadHabit, minutes).unwrap();
            assert_eq!(gains.len(), 1);
            assert_eq!(gains[&StatType::Focus], QUIT_BAD_HABIT_FOCUS_GAIN);
        }
    }

    #[test]
    fn zero_duration_yields_zero_gains_elsewhere() {
        let gains = calculate_gains(ActivityType::Meditation, 0).unwrap();
        assert_eq!(gains[&StatType::Focus], 0.0);
    }

    #[test]
    fn negative_duration_is_rejected() {
        assert!(matches!(
            calculate_gains(ActivityType::WorkoutCardio, -5),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            calculate_exp(ActivityType::WorkoutCardio, -5),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn legacy_weights_keeps_its_own_rates() {
        let gains = calculate_gains(ActivityType::WorkoutWeights, 60).unwrap();
        assert!((gains[&StatType::Strength] - 0.05).abs() < 1e-12);
        assert!((gains[&StatType::Endurance] - 0.025).abs() < 1e-12);
    }

    #[test]
    fn other_activity_grants_nothing() {
        assert!(calculate_gains(ActivityType::Other, 120).unwrap().is_empty());
        assert_eq!(calculate_exp(ActivityType::Other, 120).unwrap(), 0.0);
    }

    #[test]
    fn exp_awards() {
        assert!((calculate_exp(ActivityType::WorkoutUpperBody, 60).unwrap() - 300.0).abs() < 1e-9);
        assert!((calculate_exp(ActivityType::StudyCasual, 30).unwrap() - 75.0).abs() < 1e-9);
        assert_eq!(
            calculate_exp(ActivityType::QuitBadHabit, 0).unwrap(),
            QUIT_BAD_HABIT_EXP
        );
    }
}
