//! Stat taxonomy - the six trainable attributes.

use serde::{Deserialize, Serialize};

/// Minimum permitted value for any stat.
pub const STAT_FLOOR: f64 = 1.0;

/// A trainable attribute of the user.
///
/// The set is closed; activity gain tables and degradation categories
/// reference these variants at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatType {
    /// Physical strength
    Strength,
    /// Speed and coordination
    Agility,
    /// Stamina and resilience
    Endurance,
    /// Learning and reasoning
    Intelligence,
    /// Concentration and discipline
    Focus,
    /// Social confidence
    Charisma,
}

impl StatType {
    /// All stat types, in display order.
    pub const ALL: [StatType; 6] = [
        StatType::Strength,
        StatType::Agility,
        StatType::Endurance,
        StatType::Intelligence,
        StatType::Focus,
        StatType::Charisma,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Strength => "strength",
            StatType::Agility => "agility",
            StatType::Endurance => "endurance",
            StatType::Intelligence => "intelligence",
            StatType::Focus => "focus",
            StatType::Charisma => "charisma",
        }
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
