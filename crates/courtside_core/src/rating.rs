//! Derived, read-only queries over profile statistics.

use crate::archetype::Archetype;
use crate::profile::Profile;
use crate::stat::{Stat, StatBlock};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade for an overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Elite tier
    S,
    /// Excellent
    A,
    /// Very good
    B,
    /// Good
    C,
    /// Average
    D,
    /// Weak
    F,
}

impl Grade {
    /// Qualitative label attached to the grade.
    pub fn label(&self) -> &'static str {
        match self {
            Grade::S => "Elite",
            Grade::A => "Excellent",
            Grade::B => "Très bon",
            Grade::C => "Bon",
            Grade::D => "Moyen",
            Grade::F => "Faible",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Overall player rating: letter grade plus the average that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rating {
    /// Letter grade
    pub grade: Grade,
    /// Qualitative label
    pub label: &'static str,
    /// Raw average of the eight stats, rounded to one decimal
    pub average: f64,
}

/// Compute the overall rating of a stat block.
///
/// The raw average is normalized to a percentage of `stat_max` before the
/// fixed letter thresholds apply, so the thresholds keep their meaning
/// under any ceiling.
pub fn overall_rating(stats: &StatBlock, stat_max: i64) -> Rating {
    let average = stats.total() as f64 / Stat::ALL.len() as f64;
    let percent = average / stat_max as f64 * 100.0;

    let grade = if percent >= 85.0 {
        Grade::S
    } else if percent >= 75.0 {
        Grade::A
    } else if percent >= 65.0 {
        Grade::B
    } else if percent >= 55.0 {
        Grade::C
    } else if percent >= 45.0 {
        Grade::D
    } else {
        Grade::F
    };

    Rating {
        grade,
        label: grade.label(),
        average: (average * 10.0).round() / 10.0,
    }
}

/// Suggest the best-fitting positional archetype for a stat block.
///
/// Each of the five positional archetypes scores as the unweighted mean of
/// three stats; the highest score wins, and ties resolve to the earliest
/// archetype in catalog order.
pub fn suggested_position(stats: &StatBlock) -> Archetype {
    let score = |a: Archetype| -> i64 {
        let (x, y, z) = match a {
            Archetype::Meneur => (Stat::BallHandling, Stat::Agility, Stat::Speed),
            Archetype::Arriere => (Stat::Accuracy, Stat::Defense, Stat::Speed),
            Archetype::Ailier => (Stat::Agility, Stat::Accuracy, Stat::Defense),
            Archetype::AilierFort => (Stat::Strength, Stat::Vertical, Stat::Defense),
            Archetype::Pivot => (Stat::Strength, Stat::Vertical, Stat::Endurance),
            // Généraliste holds no position score.
            Archetype::Generaliste => return i64::MIN,
        };
        stats.get(x) + stats.get(y) + stats.get(z)
    };

    let mut best = Archetype::POSITIONAL[0];
    let mut best_score = score(best);
    for candidate in &Archetype::POSITIONAL[1..] {
        let s = score(*candidate);
        if s > best_score {
            best = *candidate;
            best_score = s;
        }
    }
    best
}

/// Stable descending sort of profiles by an arbitrary key, for leaderboards.
pub fn rank_by<K, F>(mut profiles: Vec<Profile>, key: F) -> Vec<Profile>
where
    K: Ord,
    F: Fn(&Profile) -> K,
{
    profiles.sort_by(|a, b| key(b).cmp(&key(a)));
    profiles
}
