use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
///
/// `message` carries the underlying fault and is only filled in outside production.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDto {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

/// Liveness payload for `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDto {
    /// Always `"OK"` while the process is serving requests.
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Last known database lifecycle state (`connecting`, `connected`, `unavailable`).
    pub database: String,
}

/// Readiness payload for `GET /api/ready`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReadinessDto {
    /// `"ready"` or `"degraded"`.
    pub status: String,
    pub database: String,
}
