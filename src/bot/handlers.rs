//! Command handlers
//!
//! Each handler replies with a short human-readable message; API failure
//! detail goes to the log, never to the chat.

use anyhow::Result;
use tracing::error;

use super::Bot;
use crate::jules::clean_session_id;
use crate::monitor::ToggleOutcome;
use crate::telegram::html;

/// Telegram caps messages at 4096 chars; leave room for the ellipsis.
const MAX_MESSAGE_CHARS: usize = 4000;

impl Bot {
    pub(super) async fn cmd_start(&self, chat_id: i64) -> Result<()> {
        self.reply(
            chat_id,
            "Hello! I am the Jules Monitoring Bot.\n\
             Commands:\n\
             /list - List recent sessions\n\
             /monitor - Start monitoring sessions for 1 hour\n\
             /create <owner/repo> <prompt> - Create a new session",
        )
        .await
    }

    pub(super) async fn cmd_list(&self, chat_id: i64) -> Result<()> {
        self.reply(chat_id, "Fetching sessions...").await?;

        let sessions = match self.jules.list_sessions(self.page_size).await {
            Ok(sessions) => sessions,
            Err(e) => {
                error!("Error fetching sessions: {:#}", e);
                return self
                    .reply(chat_id, "Failed to fetch sessions. Check logs.")
                    .await;
            }
        };

        if sessions.is_empty() {
            return self.reply(chat_id, "No sessions found.").await;
        }

        let mut lines = vec![html::bold("Recent Sessions:")];
        for session in sessions {
            lines.push(format!(
                "🆔 {}\nTitle: {}\n",
                html::code(&session.id),
                html::escape(&session.title),
            ));
        }

        self.reply_html(chat_id, &lines.join("\n")).await
    }

    pub(super) async fn cmd_monitor(&self, chat_id: i64) -> Result<()> {
        match self.controller.toggle().await {
            ToggleOutcome::Started => {
                self.reply(
                    chat_id,
                    "Monitoring started. I will check for changes every minute for the next hour.",
                )
                .await
            }
            ToggleOutcome::Stopped => self.reply(chat_id, "Monitoring stopped.").await,
        }
    }

    pub(super) async fn cmd_create(
        &self,
        chat_id: i64,
        owner: &str,
        repo: &str,
        prompt: &str,
    ) -> Result<()> {
        self.reply(chat_id, "Creating session...").await?;

        let detail = match self.jules.create_session(owner, repo, prompt, "main").await {
            Ok(detail) => detail,
            Err(e) => {
                error!("Error creating session: {:#}", e);
                return self
                    .reply(chat_id, "Failed to create session. Check logs.")
                    .await;
            }
        };

        let response = format!(
            "✅ Session Created!\n\
             🆔 ID: {}\n\
             🔗 URL: {}\n\
             📊 State: {}",
            html::code(&detail.id),
            html::escape(&detail.url()),
            html::escape(&detail.state),
        );

        self.reply_html(chat_id, &response).await
    }

    pub(super) async fn cmd_info(&self, chat_id: i64, session_id: &str) -> Result<()> {
        self.reply(chat_id, &format!("Fetching info for session {}...", session_id))
            .await?;

        let detail = match self.jules.get_session(session_id).await {
            Ok(detail) if !detail.id.is_empty() => detail,
            Ok(_) => {
                return self
                    .reply(
                        chat_id,
                        &format!("❌ Session {} not found or error occurred.", session_id),
                    )
                    .await;
            }
            Err(e) => {
                error!("Error fetching session {}: {:#}", session_id, e);
                return self
                    .reply(
                        chat_id,
                        &format!("❌ Session {} not found or error occurred.", session_id),
                    )
                    .await;
            }
        };

        let clean_id = clean_session_id(&detail.id);
        let response = format!(
            "🆔 ID: {}\n\
             📌 Title: {}\n\
             📊 State: {}\n\
             🔗 URL: {}\n\n\
             Activities: /list_activities_{}",
            html::code(clean_id),
            html::escape(&detail.title),
            html::escape(&detail.state),
            html::escape(&detail.url()),
            clean_id,
        );

        self.reply_html(chat_id, &response).await
    }

    pub(super) async fn cmd_list_activities(&self, chat_id: i64, session_id: &str) -> Result<()> {
        self.reply(
            chat_id,
            &format!("Fetching activities for session {}...", session_id),
        )
        .await?;

        let activities = match self.jules.list_activities(session_id, self.page_size).await {
            Ok(activities) => activities,
            Err(e) => {
                error!("Error fetching activities for {}: {:#}", session_id, e);
                return self
                    .reply(chat_id, "Failed to fetch activities. Check logs.")
                    .await;
            }
        };

        if activities.is_empty() {
            return self.reply(chat_id, "No activities found.").await;
        }

        let mut lines = vec![html::bold(&format!("Activities for {}:", session_id))];
        for activity in activities {
            lines.push(format!(
                "• {} at {}",
                html::code(&activity.activity_type),
                html::escape(&activity.create_time),
            ));
        }

        let full_text = truncate_message(lines.join("\n"));
        self.reply_html(chat_id, &full_text).await
    }
}

/// Trim over-long messages on a char boundary and mark the cut.
fn truncate_message(text: String) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text;
    }
    let mut truncated: String = text.chars().take(MAX_MESSAGE_CHARS).collect();
    truncated.push_str("...");
    truncated
}
