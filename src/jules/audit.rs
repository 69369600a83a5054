//! Append-only audit log of raw API responses
//!
//! Every successful Jules call appends one timestamped JSON line. The log is
//! write-only diagnostic output; nothing in the bot ever reads it back, and a
//! failure to write must never fail the API call that produced the response.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tracing::warn;

/// Write-only JSONL audit trail of raw API responses
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one entry. Write failures are logged and swallowed.
    pub fn record(&self, endpoint: &str, response: &serde_json::Value) {
        if let Err(e) = self.append(endpoint, response) {
            warn!("Failed to write API audit log entry: {}", e);
        }
    }

    fn append(&self, endpoint: &str, response: &serde_json::Value) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entry = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "endpoint": endpoint,
            "response": response,
        });

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)?;

        Ok(())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
