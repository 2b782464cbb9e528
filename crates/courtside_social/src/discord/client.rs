//! Discord bot client setup and lifecycle management.

use super::handler::CourtsideHandler;
use crate::bot_commands::BotCommandExecutor;
use courtside_error::{DiscordError, DiscordErrorKind};
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord client for Courtside.
///
/// Owns the Serenity client; command handling is delegated to the injected
/// [`BotCommandExecutor`].
///
/// # Example
/// ```no_run
/// # use courtside_social::{BotCommandExecutor, CourtsideBot};
/// # use std::sync::Arc;
/// # async fn demo(executor: Arc<dyn BotCommandExecutor>) -> Result<(), Box<dyn std::error::Error>> {
/// let token = std::env::var("DISCORD_TOKEN")?;
/// let mut bot = CourtsideBot::new(token, executor).await?;
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct CourtsideBot {
    client: Client,
}

impl CourtsideBot {
    /// Create a new bot instance.
    ///
    /// # Errors
    /// Returns an error if the bot token is invalid or the Serenity client
    /// fails to initialize.
    #[instrument(skip(token, executor), fields(token_len = token.len()))]
    pub async fn new(
        token: String,
        executor: Arc<dyn BotCommandExecutor>,
    ) -> Result<Self, DiscordError> {
        info!("Initializing Courtside Discord bot");

        let handler = CourtsideHandler::new(executor);
        let intents = CourtsideHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Start the bot. Blocks until shutdown.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
