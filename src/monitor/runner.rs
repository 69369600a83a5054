//! The monitoring loop
//!
//! One run polls the session source on a fixed interval for a fixed wall-clock
//! budget, diffs each poll against the state store, and delivers any notable
//! transitions as a single batched digest. The loop terminates on budget
//! expiry (with a finished notice) or on cancellation (silently; the stop
//! path already acknowledged the operator).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::evaluator;
use super::source::{Notifier, SessionSource};
use super::state::StateStore;
use crate::telegram::html;

/// Tunables for one monitoring run
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Destination chat for digests and the finished notice
    pub chat_id: i64,
    /// Page size passed to the session source
    pub page_size: u32,
    /// Sleep between poll cycles
    pub poll_interval: Duration,
    /// Total wall-clock budget of the run
    pub budget: Duration,
}

/// One monitoring run. Constructed by the controller, consumed by `run`.
pub struct MonitorRunner {
    source: Arc<dyn SessionSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<Mutex<StateStore>>,
    token: CancellationToken,
    settings: MonitorSettings,
}

impl MonitorRunner {
    pub fn new(
        source: Arc<dyn SessionSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<Mutex<StateStore>>,
        token: CancellationToken,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            token,
            settings,
        }
    }

    /// Run until the budget expires or the token is cancelled.
    pub async fn run(self) {
        info!(
            "Starting monitoring loop (interval {:?}, budget {:?})",
            self.settings.poll_interval, self.settings.budget
        );

        let deadline = Instant::now() + self.settings.budget;

        loop {
            // Both exit conditions are re-checked at every iteration boundary.
            if self.token.is_cancelled() {
                info!("Monitoring loop stopped by request");
                return;
            }
            if Instant::now() >= deadline {
                break;
            }

            self.cycle().await;

            tokio::select! {
                _ = self.token.cancelled() => {
                    info!("Monitoring loop stopped by request");
                    return;
                }
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        // Natural expiry sends exactly one finished notice. The cancellation
        // path above returns without one; the stop acknowledgement already
        // went out from the command handler.
        info!("Monitoring budget exhausted, loop finished");
        if let Err(e) = self
            .notifier
            .notify(
                self.settings.chat_id,
                "Monitoring finished (1 hour completed).",
            )
            .await
        {
            error!("Failed to send monitoring finished notice: {:#}", e);
        }
    }

    /// One fetch-evaluate-notify pass. Failures are logged and never
    /// terminate the loop.
    async fn cycle(&self) {
        debug!("Starting monitoring cycle");

        let sessions = match self.source.fetch_sessions(self.settings.page_size).await {
            Ok(sessions) => sessions,
            Err(e) => {
                error!("Error fetching sessions: {:#}", e);
                return;
            }
        };

        let mut changes = Vec::new();
        {
            let mut store = self.store.lock().await;
            for session in &sessions {
                if session.id.is_empty() {
                    continue;
                }

                let status = if session.state.is_empty() {
                    "UNKNOWN"
                } else {
                    session.state.as_str()
                };

                info!(
                    "Found session {} ({}) with status: {}",
                    session.id, session.title, status
                );

                if let Some(line) = evaluator::evaluate(
                    &session.id,
                    &session.title,
                    status,
                    store.last_seen(&session.id),
                ) {
                    changes.push(line);
                }

                // Recorded regardless of the notification outcome. Sessions
                // absent from this poll are left untouched.
                store.record(&session.id, status);
            }
        }

        if changes.is_empty() {
            return;
        }

        let digest = format!("{}\n{}", html::bold("Updates:"), changes.join("\n"));
        if let Err(e) = self.notifier.notify(self.settings.chat_id, &digest).await {
            error!("Failed to deliver update digest: {:#}", e);
        }
    }
}
