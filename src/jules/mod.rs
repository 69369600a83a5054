//! Jules API module
//! REST client for the Jules session API plus the raw-response audit log

pub mod audit;
pub mod client;

pub use audit::AuditLog;
pub use client::{clean_session_id, Activity, JulesClient, JulesError, Session, SessionDetail};
