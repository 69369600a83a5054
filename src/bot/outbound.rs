//! Outbound reply seam
//!
//! Command handlers reply through this trait rather than the concrete
//! Telegram client, so the dispatch path can be exercised with an
//! in-memory recorder.

use anyhow::Result;
use async_trait::async_trait;

use crate::telegram::TelegramClient;

/// Where command replies are delivered
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str, html: bool) -> Result<()>;
}

#[async_trait]
impl Outbound for TelegramClient {
    async fn send(&self, chat_id: i64, text: &str, html: bool) -> Result<()> {
        Ok(self.send_message(chat_id, text, html).await?)
    }
}
