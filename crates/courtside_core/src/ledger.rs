//! Atomic orchestration of profile mutations.
//!
//! [`ProfileLedger`] wraps a [`ProfileGateway`]/[`AuditSink`] implementation
//! and enforces every numeric invariant around stats and the point economy.
//! Each mutating operation runs under a per-player async lock, so two
//! concurrent calls against the same player can never both read the same
//! stale balance (the classic lost-update hazard).

use crate::archetype::Archetype;
use crate::color::color_from_name;
use crate::config::LedgerConfig;
use crate::gateway::{AuditAction, AuditEntry, AuditSink, ProfileGateway};
use crate::profile::Profile;
use crate::stat::Stat;
use chrono::{NaiveDateTime, Utc};
use courtside_error::{LedgerError, LedgerErrorKind, LedgerResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

/// Outcome of a successful point allocation, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Targeted statistic
    pub stat: Stat,
    /// Value before the allocation
    pub old_value: i64,
    /// Value after the allocation
    pub new_value: i64,
    /// Points left after spending
    pub remaining_points: i64,
}

/// Outcome of a privileged stat override, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    /// Targeted statistic
    pub stat: Stat,
    /// Value before the override
    pub old_value: i64,
    /// Value after the override
    pub new_value: i64,
}

/// A self-service personalization change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Customization {
    /// In-universe character name
    CharacterName(String),
    /// Player first name
    FirstName(String),
    /// Age in years; must be non-negative
    Age(i32),
    /// Opaque profile image URI
    Image(String),
}

impl Customization {
    fn field_name(&self) -> &'static str {
        match self {
            Customization::CharacterName(_) => "character_name",
            Customization::FirstName(_) => "first_name",
            Customization::Age(_) => "age",
            Customization::Image(_) => "profile_image",
        }
    }
}

/// Rule layer for profile statistics and the point economy.
///
/// Constructed with an explicit gateway dependency; there is no global
/// persistence handle anywhere in the workspace.
///
/// # Example
/// ```no_run
/// use courtside_core::{Archetype, LedgerConfig, ProfileLedger};
/// # use courtside_core::{AuditSink, ProfileGateway};
/// # async fn demo<G: ProfileGateway + AuditSink + 'static>(gateway: std::sync::Arc<G>) {
/// let ledger = ProfileLedger::new(gateway, LedgerConfig::default());
/// let profile = ledger.create(42, "Dunkan", Archetype::Pivot, 0).await.unwrap();
/// let result = ledger.allocate(42, "Vitesse", 10).await;
/// # }
/// ```
pub struct ProfileLedger<G> {
    gateway: Arc<G>,
    config: LedgerConfig,
    /// Per-player mutation locks; entries are created on first touch and
    /// kept for the process lifetime.
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl<G> ProfileLedger<G>
where
    G: ProfileGateway + AuditSink,
{
    /// Create a ledger over the given gateway with the given bounds.
    pub fn new(gateway: Arc<G>, config: LedgerConfig) -> Self {
        Self {
            gateway,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The numeric bounds in force.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    async fn lock_for(&self, player_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(player_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Append an audit entry; failure never rolls back the mutation it
    /// records. One retry, then the loss is logged.
    async fn audit(
        &self,
        player_id: i64,
        action: AuditAction,
        details: String,
        actor_id: Option<i64>,
    ) {
        let entry = AuditEntry {
            player_id,
            action,
            details,
            actor_id,
            timestamp: now(),
        };
        if self.gateway.append(&entry).await.is_ok() {
            return;
        }
        if let Err(e) = self.gateway.append(&entry).await {
            warn!(player_id, action = %action, error = %e, "audit append failed after successful mutation");
        }
    }

    async fn load_existing(&self, player_id: i64) -> LedgerResult<Profile> {
        self.gateway
            .load(player_id)
            .await?
            .ok_or_else(|| LedgerError::new(LedgerErrorKind::NotFound { player_id }))
    }

    /// Create a profile for a player who does not yet have one.
    ///
    /// Stats start at the configured base value with the archetype's bonuses
    /// applied once, clamped per stat. `starting_points` is caller policy,
    /// not a ledger constant.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the player already has a profile;
    /// `InvalidAmount` when `starting_points` is negative.
    #[instrument(skip(self, display_name))]
    pub async fn create(
        &self,
        player_id: i64,
        display_name: impl Into<String> + Send,
        archetype: Archetype,
        starting_points: i64,
    ) -> LedgerResult<Profile> {
        if starting_points < 0 {
            return Err(LedgerError::new(LedgerErrorKind::InvalidAmount(
                starting_points,
            )));
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        if self.gateway.load(player_id).await?.is_some() {
            return Err(LedgerError::new(LedgerErrorKind::AlreadyExists {
                player_id,
            }));
        }

        let mut profile = Profile::create(
            player_id,
            display_name,
            archetype,
            self.config.base_stat,
            self.config.stat_max,
            now(),
        );
        profile.available_points = starting_points;

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::ProfileCreated,
            format!("Archetype: {archetype}"),
            None,
        )
        .await;

        Ok(profile)
    }

    /// Load a profile, failing with `NotFound` when absent.
    pub async fn get(&self, player_id: i64) -> LedgerResult<Profile> {
        self.load_existing(player_id).await
    }

    /// All persisted profiles, unordered; callers rank them.
    pub async fn list(&self) -> LedgerResult<Vec<Profile>> {
        self.gateway.list_all().await
    }

    /// Spend available points to raise one statistic.
    ///
    /// Validation order: stat token, amount, per-call ceiling, balance,
    /// stat ceiling. On success the spent points move 1:1 from the balance
    /// into the stat.
    ///
    /// # Errors
    ///
    /// `InvalidStat`, `InvalidAmount`, `ExceedsBatchLimit`,
    /// `InsufficientPoints`, or `StatCeilingExceeded` (reporting the
    /// maximum addable remainder).
    #[instrument(skip(self))]
    pub async fn allocate(
        &self,
        player_id: i64,
        stat_token: &str,
        points: i64,
    ) -> LedgerResult<Allocation> {
        let stat = Stat::resolve(stat_token)
            .ok_or_else(|| LedgerError::new(LedgerErrorKind::InvalidStat(stat_token.into())))?;

        if points <= 0 {
            return Err(LedgerError::new(LedgerErrorKind::InvalidAmount(points)));
        }
        if points > self.config.batch_limit {
            return Err(LedgerError::new(LedgerErrorKind::ExceedsBatchLimit {
                points,
                limit: self.config.batch_limit,
            }));
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;

        if points > profile.available_points {
            return Err(LedgerError::new(LedgerErrorKind::InsufficientPoints {
                requested: points,
                available: profile.available_points,
            }));
        }

        let old_value = profile.stats.get(stat);
        if old_value + points > self.config.stat_max {
            return Err(LedgerError::new(LedgerErrorKind::StatCeilingExceeded {
                stat: stat.display_name().into(),
                current: old_value,
                requested: points,
                max_addable: self.config.stat_max - old_value,
            }));
        }

        let new_value = old_value + points;
        profile.stats.set(stat, new_value);
        profile.available_points -= points;
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::StatAdded,
            format!("{stat}: +{points}"),
            None,
        )
        .await;

        Ok(Allocation {
            stat,
            old_value,
            new_value,
            remaining_points: profile.available_points,
        })
    }

    /// Grant available points to a player (privileged).
    ///
    /// # Errors
    ///
    /// `InvalidAmount` when `amount <= 0`; `NotFound` when the player has
    /// no profile.
    #[instrument(skip(self))]
    pub async fn grant_points(
        &self,
        player_id: i64,
        amount: i64,
        actor_id: i64,
    ) -> LedgerResult<Profile> {
        if amount <= 0 {
            return Err(LedgerError::new(LedgerErrorKind::InvalidAmount(amount)));
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        profile.available_points += amount;
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::PointsGiven,
            format!("{amount} points added"),
            Some(actor_id),
        )
        .await;

        Ok(profile)
    }

    /// Set a statistic directly, bypassing the point economy (privileged).
    ///
    /// # Errors
    ///
    /// `InvalidStat` for an unknown token; `OutOfRange` when the value is
    /// outside `[0, stat_max]`.
    #[instrument(skip(self))]
    pub async fn override_stat(
        &self,
        player_id: i64,
        stat_token: &str,
        value: i64,
        actor_id: i64,
    ) -> LedgerResult<StatChange> {
        let stat = Stat::resolve(stat_token)
            .ok_or_else(|| LedgerError::new(LedgerErrorKind::InvalidStat(stat_token.into())))?;

        if !(0..=self.config.stat_max).contains(&value) {
            return Err(LedgerError::new(LedgerErrorKind::OutOfRange {
                field: stat.display_name().into(),
                value,
                min: 0,
                max: self.config.stat_max,
            }));
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        let old_value = profile.stats.get(stat);
        profile.stats.set(stat, value);
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::StatChanged,
            format!("{stat}: {old_value} → {value}"),
            Some(actor_id),
        )
        .await;

        Ok(StatChange {
            stat,
            old_value,
            new_value: value,
        })
    }

    /// Update height and/or weight (privileged).
    ///
    /// Only provided, positive fields are touched.
    ///
    /// # Errors
    ///
    /// `NoChangeRequested` unless at least one of height/weight is provided
    /// and positive.
    #[instrument(skip(self))]
    pub async fn override_physical(
        &self,
        player_id: i64,
        height_cm: Option<i32>,
        weight_kg: Option<i32>,
        actor_id: i64,
    ) -> LedgerResult<Profile> {
        let height = height_cm.filter(|h| *h > 0);
        let weight = weight_kg.filter(|w| *w > 0);
        if height.is_none() && weight.is_none() {
            return Err(LedgerError::new(LedgerErrorKind::NoChangeRequested));
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        let mut changes = Vec::new();
        if let Some(h) = height {
            profile.height_cm = h;
            changes.push(format!("height: {h} cm"));
        }
        if let Some(w) = weight {
            profile.weight_kg = w;
            changes.push(format!("weight: {w} kg"));
        }
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::PhysicalUpdated,
            changes.join(", "),
            Some(actor_id),
        )
        .await;

        Ok(profile)
    }

    /// Apply a self-service personalization change.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for a negative age.
    #[instrument(skip(self, change), fields(field = change.field_name()))]
    pub async fn customize(
        &self,
        player_id: i64,
        change: Customization,
    ) -> LedgerResult<Profile> {
        if let Customization::Age(age) = &change {
            if *age < 0 {
                return Err(LedgerError::new(LedgerErrorKind::OutOfRange {
                    field: "age".into(),
                    value: i64::from(*age),
                    min: 0,
                    max: i64::from(i32::MAX),
                }));
            }
        }

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        let field = change.field_name();
        match change {
            Customization::CharacterName(name) => profile.character_name = name,
            Customization::FirstName(name) => profile.first_name = name,
            Customization::Age(age) => profile.age = age,
            Customization::Image(uri) => profile.profile_image = uri,
        }
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::ProfileCustomized,
            format!("{field} updated"),
            None,
        )
        .await;

        Ok(profile)
    }

    /// Change the display color by name.
    ///
    /// Unknown names fall back to the default color rather than failing.
    #[instrument(skip(self))]
    pub async fn set_color(&self, player_id: i64, color_name: &str) -> LedgerResult<Profile> {
        let rgb = color_from_name(color_name);

        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        profile.embed_color = rgb as i32;
        profile.updated_at = now();

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::ColorChanged,
            format!("color changed to {color_name}"),
            None,
        )
        .await;

        Ok(profile)
    }

    /// Recompute stats from base plus archetype bonuses and zero the balance
    /// (privileged, destructive).
    ///
    /// Callers must have obtained explicit confirmation before invoking
    /// this; the ledger itself performs no confirmation.
    #[instrument(skip(self))]
    pub async fn reset(&self, player_id: i64, actor_id: i64) -> LedgerResult<Profile> {
        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_existing(player_id).await?;
        profile.reset_stats(self.config.base_stat, self.config.stat_max, now());

        self.gateway.save(&profile).await?;
        self.audit(
            player_id,
            AuditAction::PlayerReset,
            "stats reset to base values".into(),
            Some(actor_id),
        )
        .await;

        Ok(profile)
    }

    /// Delete a profile permanently (privileged, destructive).
    ///
    /// Callers must have obtained explicit confirmation before invoking
    /// this.
    ///
    /// # Errors
    ///
    /// `NotFound` when no profile exists, so callers can distinguish a
    /// no-op from a deletion.
    #[instrument(skip(self))]
    pub async fn delete(&self, player_id: i64, actor_id: i64) -> LedgerResult<()> {
        let lock = self.lock_for(player_id).await;
        let _guard = lock.lock().await;

        if !self.gateway.delete(player_id).await? {
            return Err(LedgerError::new(LedgerErrorKind::NotFound { player_id }));
        }

        self.audit(
            player_id,
            AuditAction::ProfileDeleted,
            "profile deleted".into(),
            Some(actor_id),
        )
        .await;

        Ok(())
    }
}
