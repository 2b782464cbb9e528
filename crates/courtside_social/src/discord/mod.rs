//! Discord integration.
//!
//! Wires the command executor to the Discord gateway: slash commands route
//! through [`crate::BotCommandExecutor`], and the confirmation buttons on
//! destructive commands route back as component interactions.

mod client;
mod handler;

pub use client::CourtsideBot;
pub use handler::CourtsideHandler;
