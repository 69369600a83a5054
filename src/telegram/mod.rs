//! Telegram Bot API module
//! Outbound messages and the long-poll update feed

pub mod client;
pub mod html;

pub use client::{Chat, Message, TelegramClient, TelegramError, Update};
