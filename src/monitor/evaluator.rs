//! Transition evaluator
//!
//! Pure decision logic: given a session's current status and what we last
//! saw for it, decide whether to notify and produce the notification line.
//! The evaluator never touches the state store; the caller records the
//! current status afterwards whether or not a notification was produced.

use crate::telegram::html;

/// Statuses that warrant a notification even on first observation:
/// the session is blocked waiting on the human.
pub const CRITICAL_STATES: [&str; 2] = ["AWAITING_PLAN_APPROVAL", "AWAITING_USER_FEEDBACK"];

pub fn is_critical(status: &str) -> bool {
    CRITICAL_STATES.contains(&status)
}

/// Decide whether this observation warrants a notification.
///
/// - first sight + critical status: notify
/// - first sight + anything else: stay quiet
/// - previously seen + status changed: notify, critical or not
/// - previously seen + status unchanged: stay quiet
///
/// Returns the HTML-formatted notification line when one is due.
pub fn evaluate(
    session_id: &str,
    title: &str,
    current: &str,
    previous: Option<&str>,
) -> Option<String> {
    let should_notify = match previous {
        None => is_critical(current),
        Some(prev) => prev != current,
    };

    should_notify.then(|| {
        format!(
            "Session: {} ({})\nStatus: {}",
            html::escape(title),
            html::code(session_id),
            html::bold(current),
        )
    })
}
