use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{utc_now, CrisisAlertId};

/// Review state of an alert. Closing alerts is an operator workflow outside
/// this service; alerts are created `Open`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Closed,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::Open => write!(f, "open"),
            AlertStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "open" => Ok(AlertStatus::Open),
            "closed" => Ok(AlertStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid alert status: {}", s)),
        }
    }
}

/// CrisisAlert - a chat message that tripped the crisis screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisisAlert {
    pub id: CrisisAlertId,
    pub session_id: String,
    /// The raw user text that was flagged (without the assistant reply)
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
}

impl CrisisAlert {
    /// Build a new open alert for a flagged message.
    pub fn open(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: CrisisAlertId::new(),
            session_id: session_id.into(),
            message: message.into(),
            timestamp: utc_now(),
            status: AlertStatus::Open,
        }
    }
}
