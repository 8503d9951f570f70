//! CLI error types.

use thiserror::Error;

use crate::output::OutputError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Could not reach Synse Server.
    #[error("connection error: {0}")]
    Connection(String),

    /// A request did not complete in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Synse Server returned an error response.
    #[error("server error: {description} ({code})")]
    Api {
        /// HTTP status code of the failure.
        code: u16,
        /// Server-reported description.
        description: String,
    },

    /// A response did not match the expected scheme.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Invalid configuration, e.g. an unusable server address.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command-line argument combination.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output rendering failed.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<synse_proto::ProtoError> for CliError {
    fn from(err: synse_proto::ProtoError) -> Self {
        Self::Protocol(err.to_string())
    }
}

impl From<synse_proto::ApiError> for CliError {
    fn from(err: synse_proto::ApiError) -> Self {
        Self::Api {
            code: err.http_code,
            description: err.description,
        }
    }
}
