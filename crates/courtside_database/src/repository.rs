//! PostgreSQL repository for player profiles and audit logs.

use async_trait::async_trait;
use courtside_core::{AuditEntry, AuditSink, Profile, ProfileGateway};
use courtside_error::{DatabaseError, LedgerError, LedgerErrorKind, LedgerResult};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::models::{AuditRow, NewAuditRow, ProfileRow};
use crate::schema::{audit_log, player_profiles};

/// Result type for repository operations.
pub type DbResult<T> = Result<T, DatabaseError>;

/// PostgreSQL repository for Courtside data.
///
/// Implements the core's [`ProfileGateway`] and [`AuditSink`] seams. All
/// access goes through one `Arc<Mutex<PgConnection>>`, which serializes
/// statement execution across tasks; per-player read-modify-write ordering
/// is enforced above this layer by the ledger's player locks.
///
/// # Example
/// ```no_run
/// use courtside_database::{ProfileRepository, establish_connection};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = establish_connection()?;
/// let repo = ProfileRepository::new(conn);
/// # Ok(())
/// # }
/// ```
pub struct ProfileRepository {
    /// Database connection wrapped in Arc<Mutex> for async safety.
    conn: Arc<Mutex<PgConnection>>,
}

impl ProfileRepository {
    /// Create a new repository owning the connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection handle.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }

    /// Store or update a profile.
    ///
    /// Uses INSERT ... ON CONFLICT to upsert the full record.
    #[instrument(skip(self, profile), fields(player_id = profile.player_id))]
    pub async fn store_profile(&self, profile: &Profile) -> DbResult<()> {
        let row = ProfileRow::from_profile(profile)?;
        let mut conn = self.conn.lock().await;

        diesel::insert_into(player_profiles::table)
            .values(&row)
            .on_conflict(player_profiles::player_id)
            .do_update()
            .set(&row)
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Get a profile by player ID.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, player_id: i64) -> DbResult<Option<Profile>> {
        let mut conn = self.conn.lock().await;

        let row: Option<ProfileRow> = player_profiles::table
            .find(player_id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        row.map(ProfileRow::into_profile).transpose()
    }

    /// Delete a profile; `true` when a row was removed.
    #[instrument(skip(self))]
    pub async fn delete_profile(&self, player_id: i64) -> DbResult<bool> {
        let mut conn = self.conn.lock().await;

        let deleted = diesel::delete(player_profiles::table.find(player_id))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(deleted > 0)
    }

    /// List all profiles ordered by display name.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> DbResult<Vec<Profile>> {
        let mut conn = self.conn.lock().await;

        let rows: Vec<ProfileRow> = player_profiles::table
            .order(player_profiles::display_name.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;

        rows.into_iter().map(ProfileRow::into_profile).collect()
    }

    /// Append an audit entry.
    #[instrument(skip(self, entry), fields(player_id = entry.player_id, action = %entry.action))]
    pub async fn append_audit(&self, entry: &AuditEntry) -> DbResult<()> {
        let row = NewAuditRow::from_entry(entry);
        let mut conn = self.conn.lock().await;

        diesel::insert_into(audit_log::table)
            .values(&row)
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Audit entries for a player, oldest first.
    #[instrument(skip(self))]
    pub async fn list_audit(&self, player_id: i64) -> DbResult<Vec<AuditRow>> {
        let mut conn = self.conn.lock().await;

        audit_log::table
            .filter(audit_log::player_id.eq(player_id))
            .order(audit_log::id.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)
    }
}

fn persistence(err: DatabaseError) -> LedgerError {
    LedgerError::new(LedgerErrorKind::Persistence(err.to_string()))
}

#[async_trait]
impl ProfileGateway for ProfileRepository {
    async fn load(&self, player_id: i64) -> LedgerResult<Option<Profile>> {
        self.get_profile(player_id).await.map_err(persistence)
    }

    async fn save(&self, profile: &Profile) -> LedgerResult<()> {
        self.store_profile(profile).await.map_err(persistence)
    }

    async fn delete(&self, player_id: i64) -> LedgerResult<bool> {
        self.delete_profile(player_id).await.map_err(persistence)
    }

    async fn list_all(&self) -> LedgerResult<Vec<Profile>> {
        self.list_profiles().await.map_err(persistence)
    }
}

#[async_trait]
impl AuditSink for ProfileRepository {
    async fn append(&self, entry: &AuditEntry) -> LedgerResult<()> {
        self.append_audit(entry).await.map_err(persistence)
    }
}
