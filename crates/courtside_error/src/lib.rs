//! Error types for the Courtside community bot.
//!
//! This crate provides the foundation error types used throughout the
//! Courtside ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use courtside_error::{CourtsideResult, LedgerError, LedgerErrorKind};
//!
//! fn find_profile() -> CourtsideResult<()> {
//!     Err(LedgerError::new(LedgerErrorKind::NotFound { player_id: 42 }))?
//! }
//!
//! match find_profile() {
//!     Ok(_) => println!("Found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
#[cfg(feature = "database")]
mod database;
mod discord;
mod error;
mod ledger;
mod security;

pub use command::{CommandError, CommandErrorKind, CommandResult};
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use discord::{DiscordError, DiscordErrorKind, DiscordResult};
pub use error::{CourtsideError, CourtsideErrorKind, CourtsideResult};
pub use ledger::{LedgerError, LedgerErrorKind, LedgerResult};
pub use security::{SecurityError, SecurityErrorKind, SecurityResult};
