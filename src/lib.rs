//! Juleswatch - Telegram bot for monitoring Jules API sessions

pub mod bot;
pub mod cli;
pub mod config;
pub mod jules;
pub mod monitor;
pub mod telegram;
