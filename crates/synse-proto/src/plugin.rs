//! Plugin registry payloads.
//!
//! Synse Server proxies plugin metadata and health over HTTP, so clients
//! get the full plugin surface without speaking the plugin gRPC protocol
//! themselves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary entry from `GET /plugin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Whether the plugin is currently active.
    pub active: bool,
    /// Deterministic plugin ID.
    pub id: String,
    /// Short plugin name, e.g. `"emulator"`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Plugin maintainer.
    pub maintainer: String,
    /// Canonical plugin tag, e.g. `"vaporio/emulator-plugin"`.
    pub tag: String,
    /// Network address info, populated by `GET /plugin/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<PluginNetwork>,
    /// Version info, populated by `GET /plugin/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<PluginVersion>,
    /// Health snapshot, populated by `GET /plugin/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<PluginHealth>,
}

/// How the server reaches a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginNetwork {
    /// Plugin address, e.g. `"localhost:5001"`.
    pub address: String,
    /// Transport protocol, `"tcp"` or `"unix"`.
    pub protocol: String,
}

/// Version details for a plugin binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginVersion {
    /// Plugin version.
    pub plugin_version: String,
    /// SDK version the plugin was built against.
    pub sdk_version: String,
    /// Build date of the binary.
    pub build_date: String,
    /// Source commit of the build.
    pub git_commit: String,
    /// Source tag of the build.
    pub git_tag: String,
    /// Target architecture.
    pub arch: String,
    /// Target operating system.
    pub os: String,
}

/// Health snapshot for a single plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginHealth {
    /// RFC 3339 time of the last health refresh.
    pub timestamp: DateTime<Utc>,
    /// Overall status, `"OK"` or `"FAILING"`.
    pub status: String,
    /// Optional status message.
    #[serde(default)]
    pub message: String,
    /// Individual check results.
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
}

/// One health check result within a plugin health snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Check name, e.g. `"read queue health"`.
    pub name: String,
    /// Check status, `"OK"` or `"FAILING"`.
    pub status: String,
    /// Failure message, empty when passing.
    #[serde(default)]
    pub message: String,
    /// Time of the last run.
    pub timestamp: DateTime<Utc>,
    /// Check type, e.g. `"periodic"`.
    #[serde(rename = "type")]
    pub check_type: String,
}

/// Response to `GET /plugin/health` — cluster-wide plugin health rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginHealthSummary {
    /// Overall status, `"healthy"` when every active plugin is healthy.
    pub status: String,
    /// Time of the rollup.
    pub updated: DateTime<Utc>,
    /// IDs of healthy plugins.
    #[serde(default)]
    pub healthy: Vec<String>,
    /// IDs of unhealthy plugins.
    #[serde(default)]
    pub unhealthy: Vec<String>,
    /// Number of active plugins.
    pub active: usize,
    /// Number of inactive plugins.
    pub inactive: usize,
}

impl PluginHealthSummary {
    /// Whether every active plugin reported healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Arbitrary plugin metadata map, as surfaced in device payloads.
pub type Metadata = HashMap<String, serde_json::Value>;
