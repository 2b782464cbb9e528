//! Unified interface for the Courtside community bot.
//!
//! Re-exports the pieces a deployment wires together: the profile ledger
//! and its rules, the PostgreSQL repository, the privilege and
//! confirmation layers, and the Discord command surface.

#![forbid(unsafe_code)]

mod config;
pub mod telemetry;

pub use config::BotConfig;

pub use courtside_core::{
    Archetype, Customization, LedgerConfig, Profile, ProfileLedger, Stat, StatBlock,
    overall_rating, rank_by, suggested_position,
};
pub use courtside_database::{ProfileRepository, establish_connection};
pub use courtside_error::{CourtsideError, CourtsideResult};
pub use courtside_security::{
    ActorContext, ConfirmationWorkflow, PrivilegeChecker, PrivilegeConfig,
};
pub use courtside_social::{BotCommandExecutor, ProfileCommandExecutor};

#[cfg(feature = "discord")]
pub use courtside_social::CourtsideBot;
