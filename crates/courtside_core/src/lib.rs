//! Profile and stat-point ledger for the Courtside community bot.
//!
//! This crate owns the rules governing how a player profile's statistics and
//! point balance are created, bounded, and mutated: archetype bonuses applied
//! once at creation, point allocation with conservation and ceilings, and
//! administrative overrides. Persistence and audit logging are consumed
//! through the [`ProfileGateway`] and [`AuditSink`] seams; nothing in this
//! crate talks to a database or a chat platform directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archetype;
mod color;
mod config;
mod gateway;
mod ledger;
mod profile;
mod rating;
mod stat;

pub use archetype::{Archetype, Position};
pub use color::{DEFAULT_COLOR, color_from_name};
pub use config::{BASE_STAT, LedgerConfig, MAX_POINTS_PER_ALLOCATE, STAT_MAX};
pub use gateway::{AuditAction, AuditEntry, AuditSink, ProfileGateway};
pub use ledger::{Allocation, Customization, ProfileLedger, StatChange};
pub use profile::Profile;
pub use rating::{Grade, Rating, overall_rating, rank_by, suggested_position};
pub use stat::{Stat, StatBlock};
