//! Discord command surface for the Courtside community bot.
//!
//! The command layer binds user-issued commands to ledger operations:
//! [`BotCommandExecutor`] is the platform-agnostic seam, and
//! [`ProfileCommandExecutor`] the implementation routing command names and
//! JSON arguments through privilege checks, the confirmation workflow, and
//! the profile ledger. Results are structured JSON payloads; rendering is
//! left to the platform glue.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bot_commands;
mod commands;
mod payloads;

#[cfg(feature = "discord")]
mod discord;

pub use bot_commands::{BotCommandExecutor, parse_i64_arg, parse_string_arg};
pub use commands::ProfileCommandExecutor;
pub use payloads::{allocation_payload, leaderboard_payload, profile_payload, stat_bar};

#[cfg(feature = "discord")]
pub use discord::{CourtsideBot, CourtsideHandler};
