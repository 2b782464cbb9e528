//! Player archetypes and their creation-time stat bonuses.

use crate::stat::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Court position label attached to an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// Backcourt
    Guard,
    /// Wing
    Forward,
    /// Paint
    Center,
    /// No fixed position
    Flexible,
}

impl Position {
    /// Display label for the position.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Guard => "Guard",
            Position::Forward => "Forward",
            Position::Center => "Center",
            Position::Flexible => "Flexible",
        }
    }
}

/// A named role template conferring signed stat bonuses at profile creation.
///
/// Declared in catalog order; position suggestion and tie-breaking follow
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Archetype {
    /// Meneur, the playmaking point guard
    Meneur,
    /// Arrière, the shooting guard
    Arriere,
    /// Ailier, the versatile small forward
    Ailier,
    /// Ailier Fort, the physical power forward
    AilierFort,
    /// Pivot, the dominant center
    Pivot,
    /// Généraliste, no specialization
    Generaliste,
}

/// Role tags recognized by [`Archetype::resolve_from_tags`], paired with the
/// archetype each one maps to.
const ROLE_TAGS: [(&str, Archetype); 6] = [
    ("🏀 Meneur", Archetype::Meneur),
    ("🎯 Arrière", Archetype::Arriere),
    ("⚡ Ailier", Archetype::Ailier),
    ("💪 Ailier Fort", Archetype::AilierFort),
    ("🏗️ Pivot", Archetype::Pivot),
    ("🔄 Flex", Archetype::Generaliste),
];

impl Archetype {
    /// All archetypes in catalog order.
    pub const ALL: [Archetype; 6] = [
        Archetype::Meneur,
        Archetype::Arriere,
        Archetype::Ailier,
        Archetype::AilierFort,
        Archetype::Pivot,
        Archetype::Generaliste,
    ];

    /// The five archetypes tied to a court position, in declaration order.
    ///
    /// Used by position suggestion; ties resolve to the earliest entry.
    pub const POSITIONAL: [Archetype; 5] = [
        Archetype::Meneur,
        Archetype::Arriere,
        Archetype::Ailier,
        Archetype::AilierFort,
        Archetype::Pivot,
    ];

    /// Display name of the archetype.
    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Meneur => "Meneur",
            Archetype::Arriere => "Arrière",
            Archetype::Ailier => "Ailier",
            Archetype::AilierFort => "Ailier Fort",
            Archetype::Pivot => "Pivot",
            Archetype::Generaliste => "Généraliste",
        }
    }

    /// Human description of the archetype's play style.
    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Meneur => "Spécialisé dans la distribution et la vision de jeu",
            Archetype::Arriere => "Excellent tireur avec une bonne vision défensive",
            Archetype::Ailier => "Joueur polyvalent, équilibré dans tous les domaines",
            Archetype::AilierFort => "Joueur physique avec un bon jeu près du panier",
            Archetype::Pivot => "Dominant dans la raquette, excellent rebondeur",
            Archetype::Generaliste => "Aucune spécialisation, statistiques équilibrées",
        }
    }

    /// Court position label.
    pub fn position(&self) -> Position {
        match self {
            Archetype::Meneur | Archetype::Arriere => Position::Guard,
            Archetype::Ailier | Archetype::AilierFort => Position::Forward,
            Archetype::Pivot => Position::Center,
            Archetype::Generaliste => Position::Flexible,
        }
    }

    /// Signed stat bonuses applied once, at profile creation or reset.
    ///
    /// Stats absent from the slice are untouched. Généraliste confers none.
    pub fn bonuses(&self) -> &'static [(Stat, i64)] {
        match self {
            Archetype::Meneur => &[
                (Stat::BallHandling, 15),
                (Stat::Agility, 10),
                (Stat::Speed, 10),
                (Stat::Accuracy, 5),
                (Stat::Strength, -10),
                (Stat::Vertical, -5),
            ],
            Archetype::Arriere => &[
                (Stat::Accuracy, 15),
                (Stat::Defense, 10),
                (Stat::Speed, 5),
                (Stat::Agility, 5),
                (Stat::Strength, -5),
                (Stat::Vertical, -5),
            ],
            Archetype::Ailier => &[
                (Stat::Agility, 8),
                (Stat::Accuracy, 7),
                (Stat::Defense, 7),
                (Stat::Speed, 3),
                (Stat::Strength, -5),
            ],
            Archetype::AilierFort => &[
                (Stat::Strength, 15),
                (Stat::Vertical, 10),
                (Stat::Defense, 8),
                (Stat::Endurance, 2),
                (Stat::Speed, -10),
                (Stat::Agility, -5),
            ],
            Archetype::Pivot => &[
                (Stat::Strength, 20),
                (Stat::Vertical, 15),
                (Stat::Defense, 10),
                (Stat::Endurance, 5),
                (Stat::Speed, -15),
                (Stat::Agility, -10),
                (Stat::Accuracy, -5),
            ],
            Archetype::Generaliste => &[],
        }
    }

    /// Look up an archetype by its exact display name.
    pub fn from_display_name(name: &str) -> Option<Archetype> {
        Archetype::ALL
            .iter()
            .find(|a| a.display_name() == name)
            .copied()
    }

    /// Resolve an archetype from externally supplied role tags.
    ///
    /// Returns the archetype of the first recognized tag; `None` when no tag
    /// qualifies. Callers decide the no-archetype policy.
    pub fn resolve_from_tags<S: AsRef<str>>(tags: &[S]) -> Option<Archetype> {
        tags.iter().find_map(|tag| {
            ROLE_TAGS
                .iter()
                .find(|(name, _)| *name == tag.as_ref())
                .map(|(_, archetype)| *archetype)
        })
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Archetype {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for Archetype {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Archetype, D::Error> {
        let name = String::deserialize(deserializer)?;
        Archetype::from_display_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown archetype '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_first_recognized_tag() {
        let tags = ["membre", "🎯 Arrière", "🏀 Meneur"];
        assert_eq!(Archetype::resolve_from_tags(&tags), Some(Archetype::Arriere));
    }

    #[test]
    fn unrecognized_tags_resolve_to_none() {
        let tags = ["membre", "vétéran"];
        assert_eq!(Archetype::resolve_from_tags(&tags), None);
        assert_eq!(Archetype::resolve_from_tags::<&str>(&[]), None);
    }

    #[test]
    fn flex_tag_resolves_to_generaliste() {
        assert_eq!(
            Archetype::resolve_from_tags(&["🔄 Flex"]),
            Some(Archetype::Generaliste)
        );
    }

    #[test]
    fn display_name_roundtrip() {
        use strum::IntoEnumIterator;
        for archetype in Archetype::iter() {
            assert_eq!(
                Archetype::from_display_name(archetype.display_name()),
                Some(archetype)
            );
        }
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Archetype::AilierFort).unwrap();
        assert_eq!(json, "\"Ailier Fort\"");
        let back: Archetype = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Archetype::AilierFort);
    }

    #[test]
    fn generaliste_has_no_bonuses() {
        assert!(Archetype::Generaliste.bonuses().is_empty());
    }
}
