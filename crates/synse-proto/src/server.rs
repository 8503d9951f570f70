//! Server metadata payloads: liveness status and version info.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response to `GET /test` — server liveness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Server status, `"ok"` when reachable and serving.
    pub status: String,
    /// Time at which the status was checked.
    pub timestamp: DateTime<Utc>,
}

impl Status {
    /// Whether the server reported itself healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Response to `GET /version` — server and API versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Full server version, e.g. `"3.1.0"`.
    pub version: String,
    /// API version prefix used in routes, e.g. `"v3"`.
    pub api_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes() {
        let status: Status = serde_json::from_str(
            r#"{"status": "ok", "timestamp": "2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert!(status.is_ok());
        assert_eq!(status.timestamp.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn status_not_ok() {
        let status: Status = serde_json::from_str(
            r#"{"status": "degraded", "timestamp": "2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(!status.is_ok());
    }

    #[test]
    fn version_round_trips() {
        let version = Version {
            version: "3.1.0".into(),
            api_version: "v3".into(),
        };
        let json = serde_json::to_string(&version).unwrap();
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(version, back);
    }
}
