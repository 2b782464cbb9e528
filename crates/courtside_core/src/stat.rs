//! The eight player statistics and their total mapping.

use crate::config::STAT_MAX;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A player statistic.
///
/// Declared in display order; every presentation surface iterates the
/// variants in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
pub enum Stat {
    /// Force Physique (raw physical strength)
    Strength,
    /// Précision (shooting accuracy)
    Accuracy,
    /// Manip. Ballon (ball handling)
    BallHandling,
    /// Agilité (agility)
    Agility,
    /// Détente (vertical leap)
    Vertical,
    /// Défense (defense)
    Defense,
    /// Vitesse (speed)
    Speed,
    /// Endurance (stamina)
    Endurance,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Stat {
    /// All statistics in display order.
    pub const ALL: [Stat; 8] = [
        Stat::Strength,
        Stat::Accuracy,
        Stat::BallHandling,
        Stat::Agility,
        Stat::Vertical,
        Stat::Defense,
        Stat::Speed,
        Stat::Endurance,
    ];

    /// Display name of the statistic.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stat::Strength => "Force Physique",
            Stat::Accuracy => "Précision",
            Stat::BallHandling => "Manip. Ballon",
            Stat::Agility => "Agilité",
            Stat::Vertical => "Détente",
            Stat::Defense => "Défense",
            Stat::Speed => "Vitesse",
            Stat::Endurance => "Endurance",
        }
    }

    /// Short abbreviation used in commands and compact displays.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Strength => "FOR",
            Stat::Accuracy => "PREC",
            Stat::BallHandling => "BALL",
            Stat::Agility => "AGI",
            Stat::Vertical => "DET",
            Stat::Defense => "DEF",
            Stat::Speed => "VIT",
            Stat::Endurance => "END",
        }
    }

    /// Emoji used in presentation payloads.
    pub fn emoji(&self) -> &'static str {
        match self {
            Stat::Strength => "💪",
            Stat::Accuracy => "🎯",
            Stat::BallHandling => "🏀",
            Stat::Agility => "⚡",
            Stat::Vertical => "🦘",
            Stat::Defense => "🛡️",
            Stat::Speed => "💨",
            Stat::Endurance => "🔋",
        }
    }

    /// Resolve a user-supplied token to a statistic.
    ///
    /// Matching priority: case-insensitive exact display-name match, then
    /// abbreviation match, then case-insensitive substring match. The first
    /// statistic (in display order) that matches wins.
    pub fn resolve(token: &str) -> Option<Stat> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lowered = trimmed.to_lowercase();

        if let Some(stat) = Stat::ALL
            .iter()
            .find(|s| s.display_name().to_lowercase() == lowered)
        {
            return Some(*stat);
        }

        if let Some(stat) = Stat::ALL
            .iter()
            .find(|s| s.abbreviation().eq_ignore_ascii_case(trimmed))
        {
            return Some(*stat);
        }

        Stat::ALL
            .iter()
            .find(|s| s.display_name().to_lowercase().contains(&lowered))
            .copied()
    }

    /// Look up a statistic by its exact display name.
    pub fn from_display_name(name: &str) -> Option<Stat> {
        Stat::ALL.iter().find(|s| s.display_name() == name).copied()
    }

    fn index(self) -> usize {
        match self {
            Stat::Strength => 0,
            Stat::Accuracy => 1,
            Stat::BallHandling => 2,
            Stat::Agility => 3,
            Stat::Vertical => 4,
            Stat::Defense => 5,
            Stat::Speed => 6,
            Stat::Endurance => 7,
        }
    }
}

/// Total mapping from every [`Stat`] to its current value.
///
/// Backed by a fixed array, so a partial stat map is unrepresentable.
/// Serializes to a flat name→integer JSON map (the persisted layout);
/// deserialization rejects missing keys, unknown keys, and values outside
/// `[0, STAT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBlock([i64; 8]);

impl StatBlock {
    /// Create a block with every stat set to `value`.
    pub fn filled(value: i64) -> Self {
        Self([value; 8])
    }

    /// Current value of a statistic.
    pub fn get(&self, stat: Stat) -> i64 {
        self.0[stat.index()]
    }

    /// Set a statistic to a value.
    pub fn set(&mut self, stat: Stat, value: i64) {
        self.0[stat.index()] = value;
    }

    /// Add a signed bonus to a statistic, clamping the result to `[0, max]`.
    pub fn apply_bonus(&mut self, stat: Stat, bonus: i64, max: i64) {
        let clamped = (self.get(stat) + bonus).clamp(0, max);
        self.set(stat, clamped);
    }

    /// Iterate (stat, value) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i64)> + '_ {
        Stat::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    /// Sum of all eight statistics.
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }
}

impl Serialize for StatBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for (stat, value) in self.iter() {
            map.serialize_entry(stat.display_name(), &value)?;
        }
        map.end()
    }
}

struct StatBlockVisitor;

impl<'de> Visitor<'de> for StatBlockVisitor {
    type Value = StatBlock;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from every stat name to an integer")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StatBlock, A::Error> {
        let mut values: [Option<i64>; 8] = [None; 8];

        while let Some((key, value)) = access.next_entry::<String, i64>()? {
            let stat = Stat::from_display_name(&key)
                .ok_or_else(|| de::Error::custom(format!("unknown stat '{key}'")))?;
            if !(0..=STAT_MAX).contains(&value) {
                return Err(de::Error::custom(format!(
                    "stat '{key}' value {value} outside [0, {STAT_MAX}]"
                )));
            }
            if values[stat.index()].replace(value).is_some() {
                return Err(de::Error::custom(format!("duplicate stat '{key}'")));
            }
        }

        let mut block = StatBlock::filled(0);
        for stat in Stat::ALL {
            let value = values[stat.index()].ok_or_else(|| {
                de::Error::custom(format!("missing stat '{}'", stat.display_name()))
            })?;
            block.set(stat, value);
        }
        Ok(block)
    }
}

impl<'de> Deserialize<'de> for StatBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<StatBlock, D::Error> {
        deserializer.deserialize_map(StatBlockVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn declared_order_matches_iteration_order() {
        let iterated: Vec<Stat> = Stat::iter().collect();
        assert_eq!(iterated, Stat::ALL);
    }

    #[test]
    fn resolve_exact_name_is_case_insensitive() {
        assert_eq!(Stat::resolve("Force Physique"), Some(Stat::Strength));
        assert_eq!(Stat::resolve("force physique"), Some(Stat::Strength));
        assert_eq!(Stat::resolve("VITESSE"), Some(Stat::Speed));
    }

    #[test]
    fn resolve_abbreviation() {
        assert_eq!(Stat::resolve("FOR"), Some(Stat::Strength));
        assert_eq!(Stat::resolve("ball"), Some(Stat::BallHandling));
        assert_eq!(Stat::resolve("det"), Some(Stat::Vertical));
    }

    #[test]
    fn resolve_substring() {
        assert_eq!(Stat::resolve("Ballon"), Some(Stat::BallHandling));
        assert_eq!(Stat::resolve("physique"), Some(Stat::Strength));
    }

    #[test]
    fn resolve_priority_prefers_exact_over_substring() {
        // "Endurance" is both an exact name and a substring of itself only;
        // "Force" is a substring of "Force Physique" but no exact match.
        assert_eq!(Stat::resolve("Endurance"), Some(Stat::Endurance));
        assert_eq!(Stat::resolve("Force"), Some(Stat::Strength));
    }

    #[test]
    fn resolve_unknown_token() {
        assert_eq!(Stat::resolve("Charisme"), None);
        assert_eq!(Stat::resolve(""), None);
        assert_eq!(Stat::resolve("   "), None);
    }

    #[test]
    fn block_roundtrips_through_json() {
        let mut block = StatBlock::filled(500);
        block.set(Stat::Speed, 485);
        block.set(Stat::Strength, 520);

        let json = serde_json::to_string(&block).unwrap();
        let back: StatBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn block_rejects_missing_stat() {
        let json = r#"{"Force Physique": 500}"#;
        assert!(serde_json::from_str::<StatBlock>(json).is_err());
    }

    #[test]
    fn block_rejects_out_of_range_value() {
        let mut map = serde_json::Map::new();
        for stat in Stat::ALL {
            map.insert(stat.display_name().to_string(), 500.into());
        }
        map.insert("Vitesse".to_string(), 1001.into());
        let json = serde_json::Value::Object(map).to_string();
        assert!(serde_json::from_str::<StatBlock>(&json).is_err());
    }

    #[test]
    fn total_sums_all_stats() {
        let mut block = StatBlock::filled(500);
        block.set(Stat::Defense, 510);
        assert_eq!(block.total(), 8 * 500 + 10);
    }

    #[test]
    fn apply_bonus_clamps_to_bounds() {
        let mut block = StatBlock::filled(10);
        block.apply_bonus(Stat::Speed, -25, 1000);
        assert_eq!(block.get(Stat::Speed), 0);

        block.set(Stat::Strength, 995);
        block.apply_bonus(Stat::Strength, 20, 1000);
        assert_eq!(block.get(Stat::Strength), 1000);
    }
}
