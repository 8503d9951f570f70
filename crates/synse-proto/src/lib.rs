//! # synse-proto
//!
//! Typed scheme for the Synse v3 API.
//!
//! Synse Server speaks JSON over HTTP for request/response operations and
//! over a WebSocket for streamed readings. This crate holds the decoded
//! shapes of both surfaces so that clients never touch raw payloads:
//!
//! ```text
//! ┌───────────┐   HTTP (JSON)    ┌──────────────┐   gRPC   ┌─────────┐
//! │ synse-cli │◄────────────────►│ Synse Server │◄────────►│ plugins │
//! │           │◄────────────────►│              │          └─────────┘
//! └───────────┘  WS /v3/connect  └──────────────┘
//! ```
//!
//! Modules are grouped by API surface: [`server`] for server metadata,
//! [`plugin`] for the plugin registry, [`device`] for scan/info results,
//! [`reading`] for device readings, [`write`] for writes and their
//! transactions, and [`stream`] for the WebSocket envelope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod device;
pub mod error;
pub mod plugin;
pub mod reading;
pub mod server;
pub mod stream;
pub mod write;

pub use device::{Capabilities, Device, DeviceSummary, Output, WriteCapability};
pub use error::{ApiError, ProtoError};
pub use plugin::{HealthCheck, Plugin, PluginHealth, PluginHealthSummary, PluginVersion};
pub use reading::{Reading, ReadingValue, Unit};
pub use server::{Status, Version};
pub use stream::{ReadStream, StreamEvent, StreamMessage, StreamRequest};
pub use write::{Transaction, TransactionStatus, WritePayload, WriteState};

/// API version prefix used in Synse Server URLs.
pub const API_VERSION: &str = "v3";
