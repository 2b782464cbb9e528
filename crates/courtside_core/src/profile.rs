//! The player profile record and its pure mutation rules.

use crate::archetype::Archetype;
use crate::color::DEFAULT_COLOR;
use crate::stat::StatBlock;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A player's persistent record of archetype, stats, and point balance.
///
/// Exactly one profile exists per `player_id`. Personalization fields are
/// always present with empty or zero defaults; no field is probed for
/// existence at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable external identifier (Discord snowflake as signed 64-bit).
    pub player_id: i64,
    /// Label used for presentation; mutable, not unique.
    pub display_name: String,
    /// Role template assigned at creation; admin-mutable thereafter.
    pub archetype: Archetype,
    /// Current statistic values.
    pub stats: StatBlock,
    /// Unspent currency convertible 1:1 into stat increases.
    pub available_points: i64,
    /// In-universe character name.
    pub character_name: String,
    /// Player first name.
    pub first_name: String,
    /// Age in years.
    pub age: i32,
    /// Height in centimeters; admin-set.
    pub height_cm: i32,
    /// Weight in kilograms; admin-set.
    pub weight_kg: i32,
    /// Opaque URI of the profile image.
    pub profile_image: String,
    /// 24-bit RGB presentation color.
    pub embed_color: i32,
    /// Creation timestamp; never refreshed.
    pub created_at: NaiveDateTime,
    /// Refreshed on every mutation.
    pub updated_at: NaiveDateTime,
}

impl Profile {
    /// Create a fresh profile with every stat at `base_stat` and archetype
    /// bonuses applied once, each clamped to `[0, stat_max]`.
    pub fn create(
        player_id: i64,
        display_name: impl Into<String>,
        archetype: Archetype,
        base_stat: i64,
        stat_max: i64,
        now: NaiveDateTime,
    ) -> Self {
        let mut stats = StatBlock::filled(base_stat);
        for (stat, bonus) in archetype.bonuses() {
            stats.apply_bonus(*stat, *bonus, stat_max);
        }

        Self {
            player_id,
            display_name: display_name.into(),
            archetype,
            stats,
            available_points: 0,
            character_name: String::new(),
            first_name: String::new(),
            age: 0,
            height_cm: 0,
            weight_kg: 0,
            profile_image: String::new(),
            embed_color: DEFAULT_COLOR as i32,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute stats from the base value plus the current archetype's
    /// bonuses and zero the point balance.
    ///
    /// Archetype, personalization fields, identifiers, and `created_at` are
    /// preserved.
    pub fn reset_stats(&mut self, base_stat: i64, stat_max: i64, now: NaiveDateTime) {
        let mut stats = StatBlock::filled(base_stat);
        for (stat, bonus) in self.archetype.bonuses() {
            stats.apply_bonus(*stat, *bonus, stat_max);
        }
        self.stats = stats;
        self.available_points = 0;
        self.updated_at = now;
    }

    /// Sum of the eight statistics.
    pub fn total_stats(&self) -> i64 {
        self.stats.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Stat;

    fn now() -> NaiveDateTime {
        chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc()
    }

    #[test]
    fn pivot_creation_applies_bonuses_once() {
        let profile = Profile::create(1, "Dunkan", Archetype::Pivot, 500, 1000, now());

        assert_eq!(profile.stats.get(Stat::Strength), 520);
        assert_eq!(profile.stats.get(Stat::Vertical), 515);
        assert_eq!(profile.stats.get(Stat::Defense), 510);
        assert_eq!(profile.stats.get(Stat::Endurance), 505);
        assert_eq!(profile.stats.get(Stat::Speed), 485);
        assert_eq!(profile.stats.get(Stat::Agility), 490);
        assert_eq!(profile.stats.get(Stat::Accuracy), 495);
        assert_eq!(profile.stats.get(Stat::BallHandling), 500);
        assert_eq!(profile.total_stats(), 4020);
    }

    #[test]
    fn generaliste_creation_keeps_base_everywhere() {
        let profile = Profile::create(2, "Flex", Archetype::Generaliste, 500, 1000, now());
        for (_, value) in profile.stats.iter() {
            assert_eq!(value, 500);
        }
        assert_eq!(profile.available_points, 0);
    }

    #[test]
    fn bonuses_clamp_near_bounds() {
        // Base near the ceiling: positive bonuses must not overflow it.
        let profile = Profile::create(3, "Max", Archetype::Pivot, 990, 1000, now());
        assert_eq!(profile.stats.get(Stat::Strength), 1000);
        assert_eq!(profile.stats.get(Stat::Speed), 975);

        // Base near the floor: negative bonuses must not go below zero.
        let profile = Profile::create(4, "Min", Archetype::Pivot, 10, 1000, now());
        assert_eq!(profile.stats.get(Stat::Speed), 0);
        assert_eq!(profile.stats.get(Stat::Strength), 30);
    }

    #[test]
    fn reset_restores_base_plus_bonuses_and_zeroes_points() {
        let mut profile = Profile::create(5, "Rookie", Archetype::Meneur, 500, 1000, now());
        profile.available_points = 120;
        profile.stats.set(Stat::Speed, 900);
        let created = profile.created_at;

        let later = now() + chrono::Duration::seconds(60);
        profile.reset_stats(500, 1000, later);

        assert_eq!(profile.stats.get(Stat::Speed), 510);
        assert_eq!(profile.stats.get(Stat::BallHandling), 515);
        assert_eq!(profile.available_points, 0);
        assert_eq!(profile.archetype, Archetype::Meneur);
        assert_eq!(profile.created_at, created);
        assert_eq!(profile.updated_at, later);
    }
}
