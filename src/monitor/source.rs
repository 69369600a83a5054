//! Seams between the monitoring loop and the outside world
//!
//! The runner polls sessions and delivers notifications through these
//! traits so tests can substitute in-memory fakes for the real clients.

use anyhow::Result;
use async_trait::async_trait;

use crate::jules::{JulesClient, Session};
use crate::telegram::TelegramClient;

/// Where the monitoring loop pulls session snapshots from
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_sessions(&self, page_size: u32) -> Result<Vec<Session>>;
}

/// Where the monitoring loop pushes batched notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<()>;
}

#[async_trait]
impl SessionSource for JulesClient {
    async fn fetch_sessions(&self, page_size: u32) -> Result<Vec<Session>> {
        Ok(self.list_sessions(page_size).await?)
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<()> {
        Ok(self.send_message(chat_id, text, true).await?)
    }
}
