//! Monitoring lifecycle controller
//!
//! Process-wide single-flight gate for the monitoring loop. The controller
//! owns the state store and the handle of the running task; the runner itself
//! holds no lock and relies entirely on this gate for mutual exclusion.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::runner::{MonitorRunner, MonitorSettings};
use super::source::{Notifier, SessionSource};
use super::state::StateStore;

/// Outcome of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped,
}

/// Cancellation token and task handle of the active run. The two are stored
/// and cleared together so the active/handle invariant cannot drift.
struct MonitorHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Single-flight start/stop gate for the monitoring loop
pub struct MonitorController {
    source: Arc<dyn SessionSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<Mutex<StateStore>>,
    settings: MonitorSettings,
    handle: Mutex<Option<MonitorHandle>>,
}

impl MonitorController {
    pub fn new(
        source: Arc<dyn SessionSource>,
        notifier: Arc<dyn Notifier>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            // Created empty once and kept for the process lifetime; a
            // stop/restart cycle does not reset observed session states.
            store: Arc::new(Mutex::new(StateStore::new())),
            settings,
            handle: Mutex::new(None),
        }
    }

    /// Start the loop if idle, stop it if running.
    ///
    /// A run that expired on its own leaves a finished task behind; that
    /// counts as idle, so the next toggle starts a fresh run.
    pub async fn toggle(&self) -> ToggleOutcome {
        let mut slot = self.handle.lock().await;

        let active = slot.as_ref().is_some_and(|h| !h.task.is_finished());
        if active {
            if let Some(MonitorHandle { token, task }) = slot.take() {
                token.cancel();
                task.abort();
                // Acknowledged teardown: wait for the task to wind down so
                // the handle and the cancellation land together.
                let _ = task.await;
            }
            info!("Monitoring loop stopped by operator");
            return ToggleOutcome::Stopped;
        }

        // Drop a stale handle from a naturally expired run.
        *slot = None;

        let token = CancellationToken::new();
        let runner = MonitorRunner::new(
            Arc::clone(&self.source),
            Arc::clone(&self.notifier),
            Arc::clone(&self.store),
            token.clone(),
            self.settings.clone(),
        );
        let task = tokio::spawn(runner.run());
        *slot = Some(MonitorHandle { token, task });

        info!("Monitoring loop started");
        ToggleOutcome::Started
    }

    /// Whether a monitoring run is currently active.
    pub async fn is_active(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.task.is_finished())
    }

    /// Shared handle to the state store (exposed for inspection in tests).
    pub fn store(&self) -> Arc<Mutex<StateStore>> {
        Arc::clone(&self.store)
    }
}
