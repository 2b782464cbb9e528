//! Bot configuration.

use courtside_core::LedgerConfig;
use courtside_error::{ConfigError, CourtsideResult};
use courtside_security::PrivilegeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a Courtside deployment.
///
/// Loaded from a TOML file; every section has sensible defaults, so an
/// empty file is a valid configuration. Secrets (`DISCORD_TOKEN`,
/// `DATABASE_URL`) stay in the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BotConfig {
    /// Point grant applied to newly created profiles.
    pub starting_points: i64,
    /// Seconds a destructive-action confirmation stays valid.
    pub confirmation_timeout_secs: Option<u64>,
    /// Numeric bounds the ledger enforces.
    pub ledger: LedgerConfig,
    /// Privileged-role allow-list.
    pub privileges: PrivilegeConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CourtsideResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: BotConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the starting grant is negative or the ledger
    /// bounds are incoherent.
    pub fn validate(&self) -> CourtsideResult<()> {
        if self.starting_points < 0 {
            return Err(ConfigError::new(format!(
                "starting_points must be non-negative, got {}",
                self.starting_points
            ))
            .into());
        }
        self.ledger
            .validate()
            .map_err(ConfigError::new)?;
        Ok(())
    }

    /// Confirmation expiry, defaulting to the workflow's 30 s.
    pub fn confirmation_timeout(&self) -> u64 {
        self.confirmation_timeout_secs
            .unwrap_or(courtside_security::DEFAULT_TIMEOUT_SECS)
    }
}
