//! Write payloads and transaction tracking.
//!
//! Writes are asynchronous on the platform side: `POST /write/{device}`
//! returns one transaction per action, and `GET /transaction/{id}` reports
//! progress until the plugin resolves the write.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One write action submitted to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritePayload {
    /// Action to perform, e.g. `"color"`.
    pub action: String,
    /// Action data, e.g. `"ff0000"`. Empty for data-less actions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
    /// Custom transaction ID, if the caller wants to pick one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
}

impl WritePayload {
    /// Create a payload for `action` with optional `data`.
    #[must_use]
    pub fn new(action: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: data.into(),
            transaction: None,
        }
    }
}

/// Transaction handle returned by an asynchronous write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID to poll.
    pub id: String,
    /// ID of the device written to.
    pub device: String,
    /// The action/data pair this transaction tracks.
    pub context: WriteContext,
    /// Timeout after which the write is considered failed.
    pub timeout: String,
}

/// The action/data pair recorded in a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteContext {
    /// Write action.
    pub action: String,
    /// Write data, empty for data-less actions.
    #[serde(default)]
    pub data: String,
}

/// Transaction state from `GET /transaction/{id}` or a synchronous write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Transaction ID.
    pub id: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
    /// Timeout bound for the write.
    pub timeout: String,
    /// Current state of the write.
    pub status: WriteState,
    /// The action/data pair being written.
    pub context: WriteContext,
    /// ID of the device written to.
    pub device: String,
    /// Failure message, empty unless the state is `Error`.
    #[serde(default)]
    pub message: String,
}

impl TransactionStatus {
    /// Whether the transaction has reached a terminal state.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.status, WriteState::Done | WriteState::Error)
    }
}

/// Lifecycle states of a write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteState {
    /// Queued, not yet picked up by the plugin.
    Pending,
    /// The plugin is applying the write.
    Writing,
    /// The write completed successfully.
    Done,
    /// The write failed.
    Error,
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Writing => write!(f, "WRITING"),
            Self::Done => write!(f, "DONE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_payload_skips_empty_data() {
        let payload = WritePayload::new("state", "");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"action":"state"}"#);
    }

    #[test]
    fn write_payload_serializes_data() {
        let payload = WritePayload::new("color", "ff0000");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"action":"color","data":"ff0000"}"#);
    }

    #[test]
    fn transaction_decodes() {
        let txn: Transaction = serde_json::from_str(
            r#"{
                "id": "56a32eba-1aa6-4868-84ee-fe01af8b2e6d",
                "device": "a72cs6519ee675b",
                "context": {"action": "color", "data": "ff0000"},
                "timeout": "10s"
            }"#,
        )
        .unwrap();
        assert_eq!(txn.context.action, "color");
        assert_eq!(txn.timeout, "10s");
    }

    #[test]
    fn transaction_status_decodes() {
        let status: TransactionStatus = serde_json::from_str(
            r#"{
                "id": "56a32eba-1aa6-4868-84ee-fe01af8b2e6d",
                "created": "2024-03-01T10:00:00Z",
                "updated": "2024-03-01T10:00:01Z",
                "timeout": "10s",
                "status": "DONE",
                "context": {"action": "color", "data": "ff0000"},
                "device": "a72cs6519ee675b",
                "message": ""
            }"#,
        )
        .unwrap();

        assert_eq!(status.status, WriteState::Done);
        assert!(status.is_done());
        assert!(status.message.is_empty());
    }

    #[test]
    fn pending_transaction_is_not_done() {
        let status: TransactionStatus = serde_json::from_str(
            r#"{
                "id": "t1",
                "created": "2024-03-01T10:00:00Z",
                "updated": "2024-03-01T10:00:00Z",
                "timeout": "10s",
                "status": "PENDING",
                "context": {"action": "state"},
                "device": "dev1"
            }"#,
        )
        .unwrap();
        assert!(!status.is_done());
    }

    #[test]
    fn write_state_display_matches_wire_form() {
        for (state, expect) in [
            (WriteState::Pending, "PENDING"),
            (WriteState::Writing, "WRITING"),
            (WriteState::Done, "DONE"),
            (WriteState::Error, "ERROR"),
        ] {
            assert_eq!(state.to_string(), expect);
            let wire = serde_json::to_string(&state).unwrap();
            assert_eq!(wire, format!("\"{expect}\""));
        }
    }
}
