//! CLI command implementations.
//!
//! Each submodule implements one endpoint family:
//! - [`server`] - server status, version, and config
//! - [`plugin`] - plugin listing, detail, and health
//! - [`scan`] - device enumeration
//! - [`tags`] - tag listing
//! - [`info`] - device info
//! - [`read`] - device readings
//! - [`write`] - device writes
//! - [`transaction`] - write transaction inspection
//! - [`stream`] - live reading stream

pub mod info;
pub mod plugin;
pub mod read;
pub mod scan;
pub mod server;
pub mod stream;
pub mod tags;
pub mod transaction;
pub mod write;

pub use info::InfoCommand;
pub use plugin::PluginCommand;
pub use read::ReadCommand;
pub use scan::ScanCommand;
pub use server::ServerCommand;
pub use stream::StreamCommand;
pub use tags::TagsCommand;
pub use transaction::TransactionCommand;
pub use write::WriteCommand;
