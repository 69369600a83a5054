//! Juleswatch - Telegram bot for monitoring Jules API sessions

mod bot;
mod cli;
mod config;
mod jules;
mod monitor;
mod telegram;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "juleswatch=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting juleswatch v{}", env!("CARGO_PKG_VERSION"));

    // Run CLI
    cli::run()?;

    Ok(())
}
