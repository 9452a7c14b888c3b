use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub ok: bool,
    pub message: String,
    /// RFC 3339 UTC timestamp, e.g. `2024-05-01T09:30:00.123Z`
    pub timestamp: String,
}

impl Health {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
