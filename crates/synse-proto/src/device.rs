//! Device payloads: scan summaries and full device info.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plugin::Metadata;
use crate::reading::Unit;

/// One entry in a `GET /scan` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Deterministic device ID.
    pub id: String,
    /// Optional human-assigned alias.
    #[serde(default)]
    pub alias: String,
    /// Short description of the device.
    #[serde(default)]
    pub info: String,
    /// Device type, e.g. `"temperature"`.
    #[serde(rename = "type")]
    pub device_type: String,
    /// ID of the plugin managing the device.
    pub plugin: String,
    /// Tags applied to the device.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Plugin-defined metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Full device info from `GET /info/{device}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Time at which the info was collected.
    pub timestamp: DateTime<Utc>,
    /// Deterministic device ID.
    pub id: String,
    /// Optional human-assigned alias.
    #[serde(default)]
    pub alias: String,
    /// Device type, e.g. `"led"`.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Plugin-defined metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// ID of the plugin managing the device.
    pub plugin: String,
    /// Short description of the device.
    #[serde(default)]
    pub info: String,
    /// Tags applied to the device.
    #[serde(default)]
    pub tags: Vec<String>,
    /// What the device supports.
    pub capabilities: Capabilities,
    /// Reading outputs the device produces.
    #[serde(default)]
    pub outputs: Vec<Output>,
}

/// Device capability description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Access mode, `"r"`, `"w"`, or `"rw"`.
    pub mode: String,
    /// Write capability details, absent for read-only devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<WriteCapability>,
}

impl Capabilities {
    /// Whether the device accepts writes.
    #[must_use]
    pub fn writable(&self) -> bool {
        self.mode.contains('w')
    }
}

/// Actions a writable device accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteCapability {
    /// Supported write actions, e.g. `["color", "state"]`.
    #[serde(default)]
    pub actions: Vec<String>,
}

/// One reading output a device produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Output name, e.g. `"temperature"`.
    pub name: String,
    /// Output type.
    #[serde(rename = "type", default)]
    pub output_type: String,
    /// Decimal precision applied to values.
    #[serde(default)]
    pub precision: Option<u32>,
    /// Scaling factor applied to raw values.
    #[serde(default)]
    pub scaling_factor: Option<f64>,
    /// Unit of the output, if any.
    #[serde(default)]
    pub unit: Option<Unit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN_ENTRY: &str = r#"{
        "id": "fc6e1b2e-9d7f-5a4b-8f6a-0123456789ab",
        "alias": "cooling-fan",
        "info": "Synse Fan",
        "type": "fan",
        "plugin": "4032ffbe-80db-5aa5-b794-f35c88dff85c",
        "tags": ["system/type:fan", "default/fan"],
        "metadata": {}
    }"#;

    #[test]
    fn device_summary_decodes() {
        let device: DeviceSummary = serde_json::from_str(SCAN_ENTRY).unwrap();
        assert_eq!(device.device_type, "fan");
        assert_eq!(device.alias, "cooling-fan");
        assert_eq!(device.tags.len(), 2);
    }

    #[test]
    fn device_summary_defaults_optional_fields() {
        let device: DeviceSummary = serde_json::from_str(
            r#"{"id": "abc", "type": "temperature", "plugin": "p1"}"#,
        )
        .unwrap();
        assert!(device.alias.is_empty());
        assert!(device.tags.is_empty());
        assert!(device.metadata.is_empty());
    }

    #[test]
    fn device_info_decodes_with_capabilities() {
        let device: Device = serde_json::from_str(
            r#"{
                "timestamp": "2024-03-01T10:00:00Z",
                "id": "fc6e1b2e-9d7f-5a4b-8f6a-0123456789ab",
                "alias": "",
                "type": "led",
                "metadata": {},
                "plugin": "4032ffbe-80db-5aa5-b794-f35c88dff85c",
                "info": "Synse LED",
                "tags": ["system/type:led"],
                "capabilities": {
                    "mode": "rw",
                    "write": {"actions": ["color", "state"]}
                },
                "outputs": [{
                    "name": "color",
                    "type": "color",
                    "precision": null,
                    "scaling_factor": null,
                    "unit": null
                }]
            }"#,
        )
        .unwrap();

        assert!(device.capabilities.writable());
        let write = device.capabilities.write.as_ref().unwrap();
        assert_eq!(write.actions, vec!["color", "state"]);
        assert_eq!(device.outputs.len(), 1);
        assert!(device.outputs[0].unit.is_none());
    }

    #[test]
    fn read_only_device_is_not_writable() {
        let caps: Capabilities = serde_json::from_str(r#"{"mode": "r"}"#).unwrap();
        assert!(!caps.writable());
        assert!(caps.write.is_none());
    }

    #[test]
    fn device_summary_round_trips() {
        let device: DeviceSummary = serde_json::from_str(SCAN_ENTRY).unwrap();
        let json = serde_json::to_string(&device).unwrap();
        let back: DeviceSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(device, back);
    }
}
