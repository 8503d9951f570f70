//! Output rendering for CLI commands.
//!
//! This is the single rendering chokepoint for the CLI. Command handlers
//! decode API responses into [`Record`]s, optionally run them through a
//! [`Transform`] (sort, then filter), and hand them to a [`Printer`] which
//! renders a table, JSON, or YAML to the command's writer. Streamed
//! readings bypass the printer and go through [`LiveView`] instead.

mod live;
mod printer;
mod row;
mod transform;

use thiserror::Error;

pub use live::{LiveView, DEFAULT_TICK};
pub use printer::{FormatFlags, Printer};
pub use row::{
    device_info_row, device_row, plugin_health_row, plugin_row, reading_row, status_row,
    text_row, transaction_row, transaction_status_row, version_row, Cell, Record, RowFn,
};
pub use transform::{Filters, Sorters, Transform};

/// Errors produced by the rendering pipeline.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A row function received an absent value.
    #[error("no data to render")]
    NilData,

    /// A row function received a record of the wrong kind.
    #[error("invalid row data")]
    InvalidRowData,

    /// Table output was requested without a registered row function.
    #[error("no row function set for table output")]
    NoRowFunc,

    /// No output mode is active.
    #[error("no output mode set")]
    NoOutputMode,

    /// A filter spec was not a single `key=value` pair.
    #[error("invalid filter {0:?}: expected a single key=value pair")]
    FilterParse(String),

    /// A filter spec named a key the command does not support.
    #[error("unsupported filter key: {0}")]
    UnsupportedFilter(String),

    /// Structured serialization failed.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Writing to the destination stream failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
