//! Courtside CLI binary.
//!
//! Runs the Discord bot or checks a deployment configuration:
//! - `courtside run` connects to the database and starts the bot
//! - `courtside check-config` loads and validates the TOML configuration

use clap::{Parser, Subcommand};
use courtside::BotConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "courtside", about = "Community basketball bot", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "courtside.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Discord bot
    Run,
    /// Load and validate the configuration, then exit
    CheckConfig,
}

fn load_config(path: &PathBuf) -> Result<BotConfig, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(BotConfig::from_file(path)?)
    } else {
        tracing::info!(path = %path.display(), "No config file found; using defaults");
        Ok(BotConfig::default())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    courtside::telemetry::init_console_telemetry(cli.verbose)?;

    match cli.command {
        Commands::Run => {
            let config = load_config(&cli.config)?;
            run_bot(config).await?;
        }
        Commands::CheckConfig => {
            let config = load_config(&cli.config)?;
            config.validate()?;
            println!("Configuration OK: {config:#?}");
        }
    }

    Ok(())
}

#[cfg(feature = "discord")]
async fn run_bot(config: BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    use courtside::{
        ConfirmationWorkflow, CourtsideBot, PrivilegeChecker, ProfileCommandExecutor,
        ProfileLedger, ProfileRepository, establish_connection,
    };
    use std::sync::Arc;

    let token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

    let conn = establish_connection()?;
    let repository = Arc::new(ProfileRepository::new(conn));
    let ledger = Arc::new(ProfileLedger::new(repository, config.ledger));

    let executor = ProfileCommandExecutor::new(
        ledger,
        PrivilegeChecker::new(config.privileges.clone()),
        ConfirmationWorkflow::with_timeout(config.confirmation_timeout()),
        config.starting_points,
    );

    let mut bot = CourtsideBot::new(token, Arc::new(executor)).await?;
    bot.start().await?;
    Ok(())
}

#[cfg(not(feature = "discord"))]
async fn run_bot(_config: BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    Err("built without the 'discord' feature; nothing to run".into())
}
