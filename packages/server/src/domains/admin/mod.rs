//! Admin domain - operator views over crisis alerts.

pub mod actions;

pub use actions::{list_open_alerts, ALERTS_LIMIT};
