//! Tracing initialization for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console tracing.
///
/// Respects `RUST_LOG` when set; otherwise logs the workspace crates at
/// debug and everything else at info, or everything at debug with
/// `verbose`.
pub fn init_console_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fallback = if verbose {
        "debug"
    } else {
        "info,courtside=debug"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
