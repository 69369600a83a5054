//! Session monitoring module
//! State store, transition evaluator, the polling loop, and its lifecycle
//! controller

pub mod controller;
pub mod evaluator;
pub mod runner;
pub mod source;
pub mod state;

pub use controller::{MonitorController, ToggleOutcome};
pub use runner::{MonitorRunner, MonitorSettings};
pub use source::{Notifier, SessionSource};
pub use state::StateStore;
