//! Error types for the synse-proto crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while encoding or decoding API payloads.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Failed to encode a message.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failed to decode a message.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A stream message carried an event this client does not handle.
    #[error("unexpected stream event: {0}")]
    UnexpectedEvent(String),
}

/// Error body returned by Synse Server for non-2xx responses.
///
/// The same shape is carried in `response/error` stream events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code of the failure.
    pub http_code: u16,
    /// Human-readable description of what went wrong.
    pub description: String,
    /// RFC 3339 timestamp of when the error was produced.
    #[serde(default)]
    pub timestamp: String,
    /// Additional context from the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{} ({}): {}", self.description, self.http_code, ctx),
            None => write!(f, "{} ({})", self.description, self.http_code),
        }
    }
}
