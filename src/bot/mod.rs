//! Telegram command front end
//!
//! Long-polls for updates, parses each text message into a command, and
//! dispatches it to a handler. Every command except /start is rejected
//! unless it comes from the configured admin chat.

pub mod command;
pub mod handlers;
pub mod outbound;

pub use outbound::Outbound;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::jules::{AuditLog, JulesClient};
use crate::monitor::{MonitorController, MonitorSettings};
use crate::telegram::TelegramClient;
use self::command::{Command, CommandError};

/// Long-poll window for getUpdates
const UPDATE_POLL_SECS: u64 = 50;

pub struct Bot {
    telegram: Arc<TelegramClient>,
    outbound: Arc<dyn Outbound>,
    jules: Arc<JulesClient>,
    controller: Arc<MonitorController>,
    admin_chat_id: i64,
    page_size: u32,
}

impl Bot {
    pub fn new(config: &Config) -> Result<Self> {
        let telegram = Arc::new(
            TelegramClient::new(&config.telegram_token)
                .context("failed to build Telegram client")?,
        );
        let jules = Arc::new(
            JulesClient::new(
                config.jules_token.clone(),
                AuditLog::new(&config.audit_log_path),
            )
            .context("failed to build Jules client")?,
        );

        let controller = Arc::new(MonitorController::new(
            Arc::clone(&jules) as Arc<dyn crate::monitor::SessionSource>,
            Arc::clone(&telegram) as Arc<dyn crate::monitor::Notifier>,
            MonitorSettings {
                chat_id: config.admin_chat_id,
                page_size: config.page_size,
                poll_interval: config.poll_interval,
                budget: config.monitor_budget,
            },
        ));

        let outbound = Arc::clone(&telegram) as Arc<dyn Outbound>;

        Ok(Self::with_parts(
            telegram,
            outbound,
            jules,
            controller,
            config.admin_chat_id,
            config.page_size,
        ))
    }

    /// Assemble a bot from already-built parts (the seam tests drive
    /// dispatch through).
    pub fn with_parts(
        telegram: Arc<TelegramClient>,
        outbound: Arc<dyn Outbound>,
        jules: Arc<JulesClient>,
        controller: Arc<MonitorController>,
        admin_chat_id: i64,
        page_size: u32,
    ) -> Self {
        Self {
            telegram,
            outbound,
            jules,
            controller,
            admin_chat_id,
            page_size,
        }
    }

    /// Poll for updates until the process is stopped.
    pub async fn run(&self) -> Result<()> {
        info!("Bot started, long-polling for updates");

        let mut offset: Option<i64> = None;

        loop {
            let updates = match self.telegram.get_updates(offset, UPDATE_POLL_SECS).await {
                Ok(updates) => updates,
                Err(e) => {
                    error!("Failed to fetch updates: {:#}", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);

                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text else { continue };

                if let Err(e) = self.dispatch(message.chat.id, &text).await {
                    error!("Error handling message from chat {}: {:#}", message.chat.id, e);
                }
            }
        }
    }

    /// Parse one message and route it to its handler.
    pub async fn dispatch(&self, chat_id: i64, text: &str) -> Result<()> {
        let command = match command::parse(text) {
            Ok(command) => command,
            // Non-command chatter and unknown commands are ignored.
            Err(CommandError::Unrecognized) => return Ok(()),
            // Malformed privileged commands: authorization is checked before
            // any usage hint leaks what the command expects.
            Err(usage) => {
                if !self.is_admin(chat_id) {
                    warn!("Unauthorized command from chat {}", chat_id);
                    return self.reply(chat_id, "Unauthorized.").await;
                }
                return self.reply(chat_id, &usage.to_string()).await;
            }
        };

        if let Command::Start = command {
            return self.cmd_start(chat_id).await;
        }

        if !self.is_admin(chat_id) {
            warn!("Unauthorized command from chat {}", chat_id);
            return self.reply(chat_id, "Unauthorized.").await;
        }

        match command {
            Command::Start => unreachable!("handled above"),
            Command::List => self.cmd_list(chat_id).await,
            Command::Monitor => self.cmd_monitor(chat_id).await,
            Command::Create {
                owner,
                repo,
                prompt,
            } => self.cmd_create(chat_id, &owner, &repo, &prompt).await,
            Command::Info { session_id } => self.cmd_info(chat_id, &session_id).await,
            Command::ListActivities { session_id } => {
                self.cmd_list_activities(chat_id, &session_id).await
            }
        }
    }

    fn is_admin(&self, chat_id: i64) -> bool {
        chat_id == self.admin_chat_id
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<()> {
        self.outbound
            .send(chat_id, text, false)
            .await
            .context("failed to send reply")
    }

    async fn reply_html(&self, chat_id: i64, text: &str) -> Result<()> {
        self.outbound
            .send(chat_id, text, true)
            .await
            .context("failed to send reply")
    }
}
