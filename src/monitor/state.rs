//! Last-seen session state store

use std::collections::HashMap;

/// Mapping from session id to the last-observed status string.
///
/// Entries are created on first observation and overwritten on every later
/// poll that still reports the id. Entries are never removed: a session that
/// drops out of the feed keeps its last status so its eventual reappearance
/// diffs against something. The store is created empty at process start and
/// survives monitor stop/restart cycles within one process.
#[derive(Debug, Default)]
pub struct StateStore {
    states: HashMap<String, String>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status recorded for this id, if it has ever been observed.
    pub fn last_seen(&self, session_id: &str) -> Option<&str> {
        self.states.get(session_id).map(String::as_str)
    }

    /// Record the current status, replacing any previous one.
    pub fn record(&mut self, session_id: &str, status: &str) {
        self.states
            .insert(session_id.to_string(), status.to_string());
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
