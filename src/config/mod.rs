//! Juleswatch configuration module
//! Credentials and tunables come from the environment

pub mod config;

pub use config::{Config, ConfigError};
