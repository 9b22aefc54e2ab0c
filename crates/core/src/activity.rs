//! Activity taxonomy and degradation categories.

use serde::{Deserialize, Serialize};

use crate::stat::StatType;

/// A kind of real-world activity the user can log.
///
/// The set is closed. Strings from older data files that name no known
/// variant resolve to [`ActivityType::Other`] via [`ActivityType::parse`]
/// instead of failing; `Other` grants no gains and belongs to no
/// degrading category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    /// Upper-body workout session
    WorkoutUpperBody,
    /// Lower-body workout session
    WorkoutLowerBody,
    /// Core workout session
    WorkoutCore,
    /// Cardio session
    WorkoutCardio,
    /// Weights session recorded under the pre-split schema.
    ///
    /// Kept so entries logged before the upper/lower/core split still
    /// deserialize and reverse with their original rates; new entries
    /// are never created with this variant.
    WorkoutWeights,
    /// Focused study session
    StudySerious,
    /// Light study or reading
    StudyCasual,
    /// Meditation session
    Meditation,
    /// Social activity
    Socializing,
    /// Resisted a bad habit
    QuitBadHabit,
    /// Unrecognized activity kind (fallback for unknown stored values)
    Other,
}

impl ActivityType {
    /// Activity types the CLI offers for logging.
    ///
    /// Excludes the legacy `WorkoutWeights` schema and the `Other`
    /// fallback.
    pub const LOGGABLE: [ActivityType; 9] = [
        ActivityType::WorkoutUpperBody,
        ActivityType::WorkoutLowerBody,
        ActivityType::WorkoutCore,
        ActivityType::WorkoutCardio,
        ActivityType::StudySerious,
        ActivityType::StudyCasual,
        ActivityType::Meditation,
        ActivityType::Socializing,
        ActivityType::QuitBadHabit,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::WorkoutUpperBody => "workoutUpperBody",
            ActivityType::WorkoutLowerBody => "workoutLowerBody",
            ActivityType::WorkoutCore => "workoutCore",
            ActivityType::WorkoutCardio => "workoutCardio",
            ActivityType::WorkoutWeights => "workoutWeights",
            ActivityType::StudySerious => "studySerious",
            ActivityType::StudyCasual => "studyCasual",
            ActivityType::Meditation => "meditation",
            ActivityType::Socializing => "socializing",
            ActivityType::QuitBadHabit => "quitBadHabit",
            ActivityType::Other => "other",
        }
    }

    /// Resolve a stored string to an activity type.
    ///
    /// Unknown values resolve to [`ActivityType::Other`] rather than
    /// failing, preserving the lookup-with-fallback behavior of older
    /// data files.
    pub fn parse(s: &str) -> Self {
        match s {
            "workoutUpperBody" => ActivityType::WorkoutUpperBody,
            "workoutLowerBody" => ActivityType::WorkoutLowerBody,
            "workoutCore" => ActivityType::WorkoutCore,
            "workoutCardio" => ActivityType::WorkoutCardio,
            "workoutWeights" => ActivityType::WorkoutWeights,
            "studySerious" => ActivityType::StudySerious,
            "studyCasual" => ActivityType::StudyCasual,
            "meditation" => ActivityType::Meditation,
            "socializing" => ActivityType::Socializing,
            "quitBadHabit" => ActivityType::QuitBadHabit,
            _ => ActivityType::Other,
        }
    }

    /// The degradation category this activity belongs to.
    pub fn category(&self) -> Category {
        match self {
            ActivityType::WorkoutUpperBody
            | ActivityType::WorkoutLowerBody
            | ActivityType::WorkoutCore
            | ActivityType::WorkoutCardio
            | ActivityType::WorkoutWeights => Category::Workout,
            ActivityType::StudySerious | ActivityType::StudyCasual => Category::Study,
            ActivityType::Meditation
            | ActivityType::Socializing
            | ActivityType::QuitBadHabit
            | ActivityType::Other => Category::Other,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grouping of activity types sharing a degradation schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Physical training
    Workout,
    /// Study and learning
    Study,
    /// Everything else; never degrades
    Other,
}

impl Category {
    /// Categories subject to degradation.
    pub const DEGRADABLE: [Category; 2] = [Category::Workout, Category::Study];

    /// Stats reduced when this category degrades.
    pub fn affected_stats(&self) -> &'static [StatType] {
        match self {
            Category::Workout => &[StatType::Strength, StatType::Agility, StatType::Endurance],
            Category::Study => &[StatType::Intelligence, StatType::Focus],
            Category::Other => &[],
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Workout => "workout",
            Category::Study => "study",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_activity_string_falls_back_to_other() {
        assert_eq!(ActivityType::parse("underwaterBasketWeaving"), ActivityType::Other);
        assert_eq!(ActivityType::parse(""), ActivityType::Other);
    }

    #[test]
    fn known_strings_round_trip() {
        for activity in ActivityType::LOGGABLE {
            assert_eq!(ActivityType::parse(activity.as_str()), activity);
        }
        assert_eq!(
            ActivityType::parse(ActivityType::WorkoutWeights.as_str()),
            ActivityType::WorkoutWeights
        );
    }

    #[test]
    fn legacy_weights_maps_to_workout_category() {
        assert_eq!(ActivityType::WorkoutWeights.category(), Category::Workout);
    }

    #[test]
    fn other_category_affects_no_stats() {
        assert!(Category::Other.affected_stats().is_empty());
    }
}
