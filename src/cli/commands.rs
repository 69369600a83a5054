//! CLI entry point

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::bot::Bot;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "juleswatch")]
#[command(about = "Telegram bot for monitoring Jules API sessions", long_about = None)]
struct Cli {
    /// Audit log path (default: ~/.juleswatch/jules_api.log)
    #[arg(long)]
    audit_log: Option<String>,

    /// Seconds between monitoring poll cycles
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Wall-clock budget of one monitoring run, in seconds
    #[arg(long)]
    monitor_budget: Option<u64>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Missing credentials are fatal before any command is served.
    let mut config = Config::from_env().context("Configuration error")?;

    if let Some(path) = cli.audit_log {
        config.audit_log_path = path.into();
    }
    if let Some(secs) = cli.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.monitor_budget {
        config.monitor_budget = Duration::from_secs(secs);
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let bot = Bot::new(&config)?;
        bot.run().await
    })
}
