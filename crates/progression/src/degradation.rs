//! Time-based stat degradation.
//!
//! Neglecting a degradable category (workout, study) for the threshold
//! number of whole days starts a decay: `-0.01` per complete 3-day
//! period, capped per application, clamped at the stat floor. The
//! optional relaxed-weekend mode leaves Saturdays and Sundays out of
//! the inactivity count.

use std::collections::HashMap;

use chrono::{Datelike, Weekday};
use questlog_core::{Category, Settings, Time, User, STAT_FLOOR};
use serde::{Deserialize, Serialize};

/// What a degradation pass did to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationOutcome {
    /// The user after degradation
    pub user: User,

    /// Stat loss applied per category; empty when nothing was due
    pub applied: HashMap<Category, f64>,
}

impl DegradationOutcome {
    /// True when the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

fn is_weekend(day: chrono::NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whole days elapsed between two instants, by civil date.
///
/// With `relaxed_weekend` set, Saturdays and Sundays do not count
/// toward the total.
pub fn elapsed_days(last: Time, now: Time, relaxed_weekend: bool) -> i64 {
    let start = last.date_naive();
    let end = now.date_naive();

    if !relaxed_weekend {
        return (end - start).num_days().max(0);
    }

    let mut days = 0;
    let mut day = start;
    while day < end {
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if !is_weekend(day) {
            days += 1;
        }
    }
    days
}

/// Whether a category is due for degradation.
pub fn should_degrade(
    category: Category,
    last_activity: Time,
    now: Time,
    settings: &Settings,
) -> bool {
    if !Category::DEGRADABLE.contains(&category) {
        return false;
    }
    elapsed_days(last_activity, now, settings.relaxed_weekend) >= settings.degradation_threshold_days
}

/// The stat delta (<= 0) a category has accrued since `last_activity`.
///
/// One increment per complete threshold period, capped at
/// `settings.degradation_cap` per application.
pub fn calculate_degradation(
    category: Category,
    last_activity: Time,
    now: Time,
    settings: &Settings,
) -> f64 {
    if !should_degrade(category, last_activity, now, settings) {
        return 0.0;
    }

    let days = elapsed_days(last_activity, now, settings.relaxed_weekend);
    let periods = days / settings.degradation_threshold_days;
    let amount = (periods as f64 * settings.degradation_per_period).min(settings.degradation_cap);
    -amount
}

/// Apply all due degradation to a user snapshot.
///
/// The reference date for a category is the most recent of its latest
/// activity and its last degradation, so repeated passes within one
/// threshold period are no-ops. Stats already at the floor are left
/// untouched; degraded categories get their `last_degraded` marker
/// refreshed.
pub fn apply_degradation(user: &User, now: Time, settings: &Settings) -> DegradationOutcome {
    let mut new_user = user.clone();
    let mut applied = HashMap::new();

    for category in Category::DEGRADABLE {
        let last_active = user.last_activity_in(category);
        let last_degraded = user.last_degraded.get(&category).copied();
        let Some(reference) = last_active.max(last_degraded) else {
            continue;
        };

        let amount = calculate_degradation(category, reference, now, settings);
        if amount == 0.0 {
            continue;
        }

        tracing::debug!(
            "degrading {} by {:.3} ({} days inactive)",
            category,
            amount,
            elapsed_days(reference, now, settings.relaxed_weekend)
        );

        for stat in category.affected_stats() {
            let current = new_user.stat(*stat);
            new_user.stats.insert(*stat, (current + amount).max(STAT_FLOOR));
        }
        new_user.last_degraded.insert(category, now);
        applied.insert(category, amount);
    }

    if !applied.is_empty() {
        new_user.updated_at = now;
    }

    DegradationOutcome {
        user: new_user,
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use questlog_core::{ActivityType, StatType};

    fn at(y: i32, m: u32, d: u32) -> Time {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn elapsed_days_counts_civil_days() {
        assert_eq!(elapsed_days(at(2025, 6, 2), at(2025, 6, 9), false), 7);
        assert_eq!(elapsed_days(at(2025, 6, 2), at(2025, 6, 2), false), 0);
        // Future reference dates never produce negative counts.
        assert_eq!(elapsed_days(at(2025, 6, 9), at(2025, 6, 2), false), 0);
    }

    #[test]
    fn relaxed_weekend_skips_saturday_and_sunday() {
        // Mon 2025-06-02 -> Mon 2025-06-09: seven days, two of them weekend.
        assert_eq!(elapsed_days(at(2025, 6, 2), at(2025, 6, 9), true), 5);
        // Fri 2025-06-06 -> Mon 2025-06-09: only Monday counts.
        assert_eq!(elapsed_days(at(2025, 6, 6), at(2025, 6, 9), true), 1);
    }

    #[test]
    fn should_degrade_only_after_threshold() {
        let settings = Settings::default();
        let now = at(2025, 6, 10);
        assert!(!should_degrade(Category::Workout, now - Duration::days(2), now, &settings));
        assert!(should_degrade(Category::Workout, now - Duration::days(3), now, &settings));
    }

    #[test]
    fn other_category_never_degrades() {
        let settings = Settings::default();
        let now = at(2025, 6, 10);
        assert!(!should_degrade(Category::Other, now - Duration::days(30), now, &settings));
        assert_eq!(
            calculate_degradation(Category::Other, now - Duration::days(30), now, &settings),
            0.0
        );
    }

    #[test]
    fn seven_days_is_two_periods() {
        let settings = Settings::default();
        let now = at(2025, 6, 10);
        let amount =
            calculate_degradation(Category::Study, now - Duration::days(7), now, &settings);
        assert!((amount + 0.02).abs() < 1e-12);
    }

    #[test]
    fn twenty_days_hits_the_cap() {
        let settings = Settings::default();
        let now = at(2025, 6, 30);
        let amount =
            calculate_degradation(Category::Workout, now - Duration::days(20), now, &settings);
        assert!((amount + 0.05).abs() < 1e-12);
    }

    #[test]
    fn apply_degrades_affected_stats_with_floor_clamp() {
        let settings = Settings::default();
        let now = at(2025, 6, 20);
        let mut user = User::new(now - Duration::days(30));
        user.stats.insert(StatType::Strength, 2.0);
        // Agility left at the floor; endurance just above it.
        user.stats.insert(StatType::Endurance, 1.01);
        user.last_activity
            .insert(ActivityType::WorkoutUpperBody, now - Duration::days(7));

        let outcome = apply_degradation(&user, now, &settings);
        assert!((outcome.applied[&Category::Workout] + 0.02).abs() < 1e-12);
        assert!((outcome.user.stat(StatType::Strength) - 1.98).abs() < 1e-12);
        assert_eq!(outcome.user.stat(StatType::Agility), STAT_FLOOR);
        assert_eq!(outcome.user.stat(StatType::Endurance), STAT_FLOOR);
        assert_eq!(outcome.user.last_degraded[&Category::Workout], now);
        // Study never had any activity, so it is untouched.
        assert!(!outcome.applied.contains_key(&Category::Study));
    }

    #[test]
    fn repeated_passes_are_idempotent_within_a_period() {
        let settings = Settings::default();
        let now = at(2025, 6, 20);
        let mut user = User::new(now - Duration::days(30));
        user.stats.insert(StatType::Intelligence, 3.0);
        user.last_activity
            .insert(ActivityType::StudySerious, now - Duration::days(10));

        let first = apply_degradation(&user, now, &settings);
        assert!(!first.is_noop());

        let second = apply_degradation(&first.user, now + Duration::days(1), &settings);
        assert!(second.is_noop());
        assert_eq!(
            second.user.stat(StatType::Intelligence),
            first.user.stat(StatType::Intelligence)
        );
    }

    #[test]
    fn user_with_no_history_is_untouched() {
        let settings = Settings::default();
        let now = at(2025, 6, 20);
        let user = User::new(now - Duration::days(100));
        let outcome = apply_degradation(&user, now, &settings);
        assert!(outcome.is_noop());
        assert_eq!(outcome.user, user);
    }
}
