//! Row models and conversions between rows and core types.

use chrono::NaiveDateTime;
use courtside_core::{Archetype, AuditAction, AuditEntry, Profile, StatBlock};
use courtside_error::{DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;

use crate::schema::{audit_log, player_profiles};

/// Database row for the player_profiles table.
///
/// Stats are stored as a flat name→integer JSONB map; the archetype as its
/// display name. Used for both reads and writes; the full record is always
/// round-tripped.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = player_profiles)]
#[diesel(primary_key(player_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub player_id: i64,
    pub display_name: String,
    pub archetype: String,
    pub stats: serde_json::Value,
    pub available_points: i64,
    pub character_name: String,
    pub first_name: String,
    pub age: i32,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub profile_image: String,
    pub embed_color: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProfileRow {
    /// Convert a core profile into its row form.
    pub fn from_profile(profile: &Profile) -> Result<Self, DatabaseError> {
        Ok(Self {
            player_id: profile.player_id,
            display_name: profile.display_name.clone(),
            archetype: profile.archetype.display_name().to_string(),
            stats: serde_json::to_value(profile.stats)?,
            available_points: profile.available_points,
            character_name: profile.character_name.clone(),
            first_name: profile.first_name.clone(),
            age: profile.age,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            profile_image: profile.profile_image.clone(),
            embed_color: profile.embed_color,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }

    /// Convert a row back into a core profile.
    ///
    /// Fails with a serialization error when the stored archetype name or
    /// stats map no longer parses.
    pub fn into_profile(self) -> Result<Profile, DatabaseError> {
        let archetype = Archetype::from_display_name(&self.archetype).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown archetype '{}' for player {}",
                self.archetype, self.player_id
            )))
        })?;
        let stats: StatBlock = serde_json::from_value(self.stats)?;

        Ok(Profile {
            player_id: self.player_id,
            display_name: self.display_name,
            archetype,
            stats,
            available_points: self.available_points,
            character_name: self.character_name,
            first_name: self.first_name,
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            profile_image: self.profile_image,
            embed_color: self.embed_color,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for the audit_log table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = audit_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditRow {
    pub id: i32,
    pub player_id: i64,
    pub action: String,
    pub details: String,
    pub actor_id: Option<i64>,
    pub timestamp: NaiveDateTime,
}

/// Insertable audit record; the id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_log)]
pub struct NewAuditRow {
    pub player_id: i64,
    pub action: String,
    pub details: String,
    pub actor_id: Option<i64>,
    pub timestamp: NaiveDateTime,
}

impl NewAuditRow {
    /// Convert a core audit entry into its insertable form.
    pub fn from_entry(entry: &AuditEntry) -> Self {
        Self {
            player_id: entry.player_id,
            action: entry.action.as_str().to_string(),
            details: entry.details.clone(),
            actor_id: entry.actor_id,
            timestamp: entry.timestamp,
        }
    }
}
