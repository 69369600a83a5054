//! Juleswatch configuration
//! Required credentials are read from the environment at startup;
//! a missing credential is fatal before any command is served.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

/// Configuration errors are fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}. Please check your environment or .env file.")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Juleswatch configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub telegram_token: String,

    /// Jules API key
    pub jules_token: String,

    /// The single chat authorized to issue commands; also the
    /// destination for all monitoring notifications
    pub admin_chat_id: i64,

    /// Where raw API responses are appended as JSON lines
    pub audit_log_path: PathBuf,

    /// Sleep between monitoring poll cycles
    pub poll_interval: Duration,

    /// Total wall-clock budget of one monitoring run
    pub monitor_budget: Duration,

    /// Page size for session and activity listings
    pub page_size: u32,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// TG_TOKEN, JULES_TOKEN and ADMIN_CHAT_ID are required.
    /// JULES_AUDIT_LOG optionally overrides the audit log location.
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_token = require("TG_TOKEN")?;
        let jules_token = require("JULES_TOKEN")?;

        let raw_chat_id = require("ADMIN_CHAT_ID")?;
        let admin_chat_id = raw_chat_id.parse().map_err(|_| ConfigError::InvalidVar {
            var: "ADMIN_CHAT_ID",
            value: raw_chat_id.clone(),
        })?;

        let config = Self {
            telegram_token,
            jules_token,
            admin_chat_id,
            audit_log_path: default_audit_log_path(),
            poll_interval: Duration::from_secs(60),
            monitor_budget: Duration::from_secs(3600),
            page_size: 10,
        };

        debug!("Loaded configuration (admin chat {})", config.admin_chat_id);
        Ok(config)
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

/// Default audit log path: JULES_AUDIT_LOG, else ~/.juleswatch/jules_api.log,
/// falling back to the working directory when no home is available.
fn default_audit_log_path() -> PathBuf {
    if let Ok(path) = env::var("JULES_AUDIT_LOG") {
        return PathBuf::from(path);
    }

    dirs::home_dir()
        .map(|h| h.join(".juleswatch").join("jules_api.log"))
        .unwrap_or_else(|| PathBuf::from("jules_api.log"))
}
