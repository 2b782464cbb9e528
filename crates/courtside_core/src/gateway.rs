//! Persistence and audit seams consumed by the ledger.
//!
//! The ledger never owns a database handle; it is constructed with an
//! implementation of these traits. Production code provides a PostgreSQL
//! repository; tests provide an in-memory double.

use crate::profile::Profile;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use courtside_error::LedgerResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind discriminator for audit entries.
///
/// Rendered in SCREAMING_SNAKE form, the shape the audit table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    /// Profile created with an archetype
    ProfileCreated,
    /// Self-service point allocation into a stat
    StatAdded,
    /// Privileged point grant
    PointsGiven,
    /// Privileged direct stat override
    StatChanged,
    /// Privileged height/weight override
    PhysicalUpdated,
    /// Self-service personalization change
    ProfileCustomized,
    /// Self-service display color change
    ColorChanged,
    /// Privileged full reset
    PlayerReset,
    /// Privileged deletion
    ProfileDeleted,
}

impl AuditAction {
    /// Stable string form persisted in the audit table.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ProfileCreated => "PROFILE_CREATED",
            AuditAction::StatAdded => "STAT_ADDED",
            AuditAction::PointsGiven => "POINTS_GIVEN",
            AuditAction::StatChanged => "STAT_CHANGED",
            AuditAction::PhysicalUpdated => "PHYSICAL_UPDATED",
            AuditAction::ProfileCustomized => "PROFILE_CUSTOMIZED",
            AuditAction::ColorChanged => "COLOR_CHANGED",
            AuditAction::PlayerReset => "PLAYER_RESET",
            AuditAction::ProfileDeleted => "PROFILE_DELETED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only record of a mutating action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Player the action targeted
    pub player_id: i64,
    /// What happened
    pub action: AuditAction,
    /// Free-form detail (deltas, old→new values)
    pub details: String,
    /// Acting moderator; `None` when self-initiated
    pub actor_id: Option<i64>,
    /// When the action happened
    pub timestamp: NaiveDateTime,
}

/// Load/save/delete/list access to persisted profiles.
///
/// Each call is assumed atomic; no cross-call transactions are required.
/// Implementations map their own failures into
/// `LedgerErrorKind::Persistence`.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Load a profile by player ID, or `None` when absent.
    async fn load(&self, player_id: i64) -> LedgerResult<Option<Profile>>;

    /// Persist a profile (insert or update).
    async fn save(&self, profile: &Profile) -> LedgerResult<()>;

    /// Remove a profile permanently; `true` when a row was deleted.
    async fn delete(&self, player_id: i64) -> LedgerResult<bool>;

    /// All persisted profiles, unordered.
    async fn list_all(&self) -> LedgerResult<Vec<Profile>>;
}

/// Append-only audit log.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one entry. Failures are reported but never mutate state.
    async fn append(&self, entry: &AuditEntry) -> LedgerResult<()>;
}
