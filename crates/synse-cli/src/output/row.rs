//! Row extraction: turning decoded API payloads into table cells.
//!
//! A [`RowFn`] maps one [`Record`] to the ordered cells of a table row.
//! Row functions are pure and total over the record kinds they claim to
//! support. Two failure modes are kept distinct so callers and tests can
//! tell them apart: an absent value is [`OutputError::NilData`], a record
//! of the wrong kind is [`OutputError::InvalidRowData`]. The nil check
//! always runs before the kind check.

use serde::Serialize;
use synse_proto::{
    Device, DeviceSummary, Plugin, PluginHealthSummary, Reading, Status, Transaction,
    TransactionStatus, Version,
};

use super::OutputError;

/// One table cell, already rendered to its display form.
pub type Cell = String;

/// Converts one record into the cells of a table row.
pub type RowFn = fn(Option<&Record>) -> Result<Vec<Cell>, OutputError>;

/// A decoded API payload that can be rendered as a table row.
///
/// The untagged serialization keeps JSON and YAML dumps transparent:
/// structured output exposes exactly the fields the server sent, while
/// table output exposes only the columns a row function chooses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Server liveness status.
    Status(Status),
    /// Server version info.
    Version(Version),
    /// Plugin summary or detail.
    Plugin(Plugin),
    /// Cluster-wide plugin health rollup.
    PluginHealth(PluginHealthSummary),
    /// Device summary from a scan.
    Device(DeviceSummary),
    /// Full device info.
    DeviceInfo(Box<Device>),
    /// One device reading.
    Reading(Reading),
    /// Transaction handle from an asynchronous write.
    Transaction(Transaction),
    /// Transaction status.
    TransactionStatus(TransactionStatus),
    /// A bare string payload, e.g. a tag or a transaction ID.
    Text(String),
}

/// Row function for [`Record::Status`].
pub fn status_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Status(status)) => Ok(vec![
            status.status.clone(),
            status.timestamp.to_rfc3339(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Version`].
pub fn version_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Version(version)) => Ok(vec![
            version.version.clone(),
            version.api_version.clone(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Plugin`].
pub fn plugin_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Plugin(plugin)) => Ok(vec![
            plugin.id.clone(),
            plugin.name.clone(),
            plugin.tag.clone(),
            if plugin.active { "yes".into() } else { "no".into() },
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::PluginHealth`].
pub fn plugin_health_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::PluginHealth(health)) => Ok(vec![
            health.status.clone(),
            health.healthy.len().to_string(),
            health.unhealthy.len().to_string(),
            health.active.to_string(),
            health.inactive.to_string(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Device`] (scan results).
pub fn device_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Device(device)) => Ok(vec![
            device.id.clone(),
            device.device_type.clone(),
            device.info.clone(),
            device.plugin.clone(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::DeviceInfo`].
pub fn device_info_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::DeviceInfo(device)) => Ok(vec![
            device.id.clone(),
            device.alias.clone(),
            device.device_type.clone(),
            device.capabilities.mode.clone(),
            device.info.clone(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Reading`].
pub fn reading_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Reading(reading)) => Ok(reading_cells(reading)),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Transaction`].
pub fn transaction_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Transaction(txn)) => Ok(vec![
            txn.id.clone(),
            txn.context.action.clone(),
            txn.context.data.clone(),
            txn.device.clone(),
            txn.timeout.clone(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::TransactionStatus`].
pub fn transaction_status_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::TransactionStatus(status)) => Ok(vec![
            status.id.clone(),
            status.status.to_string(),
            status.context.action.clone(),
            status.device.clone(),
            status.message.clone(),
        ]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Row function for [`Record::Text`].
pub fn text_row(record: Option<&Record>) -> Result<Vec<Cell>, OutputError> {
    match record {
        None => Err(OutputError::NilData),
        Some(Record::Text(text)) => Ok(vec![text.clone()]),
        Some(_) => Err(OutputError::InvalidRowData),
    }
}

/// Cells for one reading row; shared with the live streaming view.
pub(crate) fn reading_cells(reading: &Reading) -> Vec<Cell> {
    let value = match &reading.value {
        Some(value) => {
            let rendered = value.to_string();
            match &reading.unit {
                Some(unit) if !unit.symbol.is_empty() => {
                    format!("{rendered} {}", escape_percent(&unit.symbol))
                }
                _ => rendered,
            }
        }
        None => "-".into(),
    };
    vec![
        reading.device.clone(),
        reading.reading_type.clone(),
        value,
        reading.timestamp.to_rfc3339(),
    ]
}

/// Escape a literal `%` so the symbol survives template-style rendering.
fn escape_percent(symbol: &str) -> String {
    symbol.replace('%', "%%")
}
