//! WebSocket stream envelope for `WS /v3/connect`.
//!
//! Every frame on the socket is a JSON envelope with a request-correlation
//! `id`, an `event` string, and an event-specific `data` payload:
//!
//! ```text
//! ┌───────────┐  request/read_stream   ┌──────────────┐
//! │ synse-cli │───────────────────────►│ Synse Server │
//! │           │◄───────────────────────│              │
//! └───────────┘   response/reading …   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use synse_proto::stream::{StreamMessage, StreamEvent, StreamRequest, ReadStream};
//!
//! let request = StreamRequest::read_stream(1, ReadStream::default());
//! assert!(request.to_json().unwrap().contains("request/read_stream"));
//!
//! let frame: StreamMessage = serde_json::from_str(r#"
//!     {
//!         "id": 1,
//!         "event": "response/reading",
//!         "data": {
//!             "device": "a72cs6519ee675b",
//!             "timestamp": "2024-03-01T10:00:00Z",
//!             "type": "temperature",
//!             "value": 20.3
//!         }
//!     }
//! "#).unwrap();
//! assert!(matches!(frame.decode().unwrap(), StreamEvent::Reading(_)));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ProtoError};
use crate::reading::Reading;

/// Event name for a reading-stream subscription request.
pub const EVENT_READ_STREAM: &str = "request/read_stream";
/// Event name carrying one streamed reading.
pub const EVENT_READING: &str = "response/reading";
/// Event name carrying an API error.
pub const EVENT_ERROR: &str = "response/error";

/// Selector criteria for a reading-stream subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStream {
    /// Restrict the stream to these device IDs. Empty means all devices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    /// Restrict the stream to devices matching any of these tag groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<Vec<String>>,
}

/// A request frame sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRequest {
    /// Correlation ID echoed back in response frames.
    pub id: u64,
    /// Event name.
    pub event: String,
    /// Event payload.
    pub data: ReadStream,
}

impl StreamRequest {
    /// Build a `request/read_stream` subscription frame.
    #[must_use]
    pub fn read_stream(id: u64, data: ReadStream) -> Self {
        Self {
            id,
            event: EVENT_READ_STREAM.into(),
            data,
        }
    }

    /// Encode the frame as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtoError> {
        serde_json::to_string(self).map_err(|e| ProtoError::Encoding(e.to_string()))
    }
}

/// A response frame received from the server, payload still undecoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamMessage {
    /// Correlation ID of the originating request.
    pub id: u64,
    /// Event name.
    pub event: String,
    /// Event payload, decoded per-event by [`StreamMessage::decode`].
    pub data: serde_json::Value,
}

impl StreamMessage {
    /// Parse a frame from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid envelope.
    pub fn from_json(text: &str) -> Result<Self, ProtoError> {
        serde_json::from_str(text).map_err(|e| ProtoError::Decoding(e.to_string()))
    }

    /// Decode the payload according to the frame's event name.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::UnexpectedEvent`] for events this client does
    /// not handle, or a decoding error if the payload does not match the
    /// event's schema.
    pub fn decode(&self) -> Result<StreamEvent, ProtoError> {
        match self.event.as_str() {
            EVENT_READING => {
                let reading: Reading = serde_json::from_value(self.data.clone())
                    .map_err(|e| ProtoError::Decoding(e.to_string()))?;
                Ok(StreamEvent::Reading(Box::new(reading)))
            }
            EVENT_ERROR => {
                let error: ApiError = serde_json::from_value(self.data.clone())
                    .map_err(|e| ProtoError::Decoding(e.to_string()))?;
                Ok(StreamEvent::Error(error))
            }
            other => Err(ProtoError::UnexpectedEvent(other.into())),
        }
    }
}

/// Decoded payload of a response frame.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// One streamed reading.
    Reading(Box<Reading>),
    /// The server rejected the request or the stream failed.
    Error(ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_stream_request_encodes() {
        let request = StreamRequest::read_stream(
            3,
            ReadStream {
                ids: vec!["a72cs6519ee675b".into()],
                tag_groups: vec![],
            },
        );
        let json = request.to_json().unwrap();

        assert!(json.contains(r#""event":"request/read_stream""#));
        assert!(json.contains(r#""id":3"#));
        assert!(json.contains("a72cs6519ee675b"));
        // Empty selectors are omitted from the frame.
        assert!(!json.contains("tag_groups"));
    }

    #[test]
    fn reading_frame_decodes() {
        let frame = StreamMessage::from_json(
            r#"{
                "id": 1,
                "event": "response/reading",
                "data": {
                    "device": "a72cs6519ee675b",
                    "timestamp": "2024-03-01T10:00:00Z",
                    "type": "temperature",
                    "device_type": "temperature",
                    "value": 20.3
                }
            }"#,
        )
        .unwrap();

        match frame.decode().unwrap() {
            StreamEvent::Reading(reading) => {
                assert_eq!(reading.device, "a72cs6519ee675b");
                assert_eq!(reading.reading_type, "temperature");
            }
            StreamEvent::Error(e) => panic!("expected reading, got error: {e}"),
        }
    }

    #[test]
    fn error_frame_decodes() {
        let frame = StreamMessage::from_json(
            r#"{
                "id": 1,
                "event": "response/error",
                "data": {"http_code": 400, "description": "invalid tag group"}
            }"#,
        )
        .unwrap();

        match frame.decode().unwrap() {
            StreamEvent::Error(error) => assert_eq!(error.http_code, 400),
            StreamEvent::Reading(_) => panic!("expected error event"),
        }
    }

    #[test]
    fn unknown_event_is_rejected() {
        let frame = StreamMessage::from_json(
            r#"{"id": 1, "event": "response/status", "data": {}}"#,
        )
        .unwrap();

        let err = frame.decode().unwrap_err();
        assert!(matches!(err, ProtoError::UnexpectedEvent(e) if e == "response/status"));
    }

    #[test]
    fn malformed_frame_is_a_decoding_error() {
        let err = StreamMessage::from_json("not json").unwrap_err();
        assert!(matches!(err, ProtoError::Decoding(_)));
    }
}
