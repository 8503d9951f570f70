//! Reading payloads from `GET /read`, `GET /read/{device}`, and the
//! WebSocket reading stream.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plugin::Metadata;

/// One device reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// ID of the device the reading came from.
    pub device: String,
    /// Time at which the reading was taken.
    pub timestamp: DateTime<Utc>,
    /// Reading type, e.g. `"temperature"` or `"speed"`.
    #[serde(rename = "type")]
    pub reading_type: String,
    /// Type of the originating device.
    #[serde(default)]
    pub device_type: String,
    /// Unit of the value, absent for unitless readings.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// The reading value; absent when the device reported no data.
    #[serde(default)]
    pub value: Option<ReadingValue>,
    /// Plugin-supplied context for the reading.
    #[serde(default)]
    pub context: Metadata,
}

/// Unit of measure for a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Full unit name, e.g. `"celsius"`.
    pub name: String,
    /// Unit symbol, e.g. `"C"` or `"%"`.
    pub symbol: String,
}

/// A reading value as reported by a plugin.
///
/// Plugins report numbers, booleans, or strings depending on the device;
/// the untagged representation decodes whichever arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    /// Boolean state, e.g. a lock or LED state.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Textual value, e.g. an LED color.
    Text(String),
}

impl fmt::Display for ReadingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
