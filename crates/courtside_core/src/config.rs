//! Ledger numeric policy.
//!
//! One ceiling and one base value apply uniformly everywhere: allocation,
//! bonus clamping, reset, and display denominators.

use serde::{Deserialize, Serialize};

/// Maximum legal value for any single statistic.
pub const STAT_MAX: i64 = 1000;

/// Value every statistic starts at before archetype bonuses.
pub const BASE_STAT: i64 = 500;

/// Largest number of points one allocate call may spend.
pub const MAX_POINTS_PER_ALLOCATE: i64 = 100;

/// Numeric bounds the ledger enforces.
///
/// # Examples
///
/// ```
/// use courtside_core::LedgerConfig;
///
/// let config = LedgerConfig::default();
/// assert_eq!(config.stat_max, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Ceiling for every statistic.
    #[serde(default = "default_stat_max")]
    pub stat_max: i64,

    /// Base value stats are created and reset to.
    #[serde(default = "default_base_stat")]
    pub base_stat: i64,

    /// Per-call allocation ceiling.
    #[serde(default = "default_batch_limit")]
    pub batch_limit: i64,
}

fn default_stat_max() -> i64 {
    STAT_MAX
}

fn default_base_stat() -> i64 {
    BASE_STAT
}

fn default_batch_limit() -> i64 {
    MAX_POINTS_PER_ALLOCATE
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            stat_max: STAT_MAX,
            base_stat: BASE_STAT,
            batch_limit: MAX_POINTS_PER_ALLOCATE,
        }
    }
}

impl LedgerConfig {
    /// Validates that the bounds are coherent.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is non-positive or the base value does
    /// not fit under the ceiling.
    pub fn validate(&self) -> Result<(), String> {
        if self.stat_max <= 0 {
            return Err(format!("stat_max must be positive, got {}", self.stat_max));
        }
        if !(0..=self.stat_max).contains(&self.base_stat) {
            return Err(format!(
                "base_stat must be in [0, {}], got {}",
                self.stat_max, self.base_stat
            ));
        }
        if self.batch_limit <= 0 {
            return Err(format!(
                "batch_limit must be positive, got {}",
                self.batch_limit
            ));
        }
        Ok(())
    }
}
