//! # synse-cli
//!
//! Command-line client for the Synse platform.
//!
//! Provides commands for:
//! - Server status, version, and configuration
//! - Plugin inspection and health
//! - Device enumeration, info, reads, and writes
//! - Live streaming of device readings
//!
//! # Architecture
//!
//! The CLI talks to Synse Server over HTTP, plus a WebSocket for
//! streamed readings. [`client::SynseClient`] owns both transports and
//! returns decoded `synse-proto` payloads; command handlers feed those
//! through the rendering pipeline in [`output`] — transform (sort,
//! filter), then print as a table, JSON, or YAML.
//!
//! ```text
//! ┌───────────┐    HTTP + WebSocket    ┌──────────────┐
//! │ synse-cli │◄──────────────────────►│ Synse Server │
//! └───────────┘      (JSON, v3)        └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands};
pub use client::SynseClient;
pub use error::CliError;
pub use output::{FormatFlags, Printer};
