pub mod crisis_alert;

pub use crisis_alert::{AlertStatus, CrisisAlert};
