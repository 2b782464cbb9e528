//! PostgreSQL persistence for Courtside profiles and audit logs.
//!
//! Implements the core's [`courtside_core::ProfileGateway`] and
//! [`courtside_core::AuditSink`] seams over diesel. One profile row per
//! player with stats stored as a flat name→integer JSONB map; one
//! append-only audit row per logged action.
//!
//! The table definitions live in `sql/schema.sql`; apply them once before
//! starting the bot. The crate performs no migrations at runtime.

#![forbid(unsafe_code)]

mod connection;
mod models;
mod repository;
pub mod schema;

pub use connection::establish_connection;
pub use models::{AuditRow, NewAuditRow, ProfileRow};
pub use repository::{DbResult, ProfileRepository};
