//! Configuration types for pfsense-dns-sync.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Appliance connection configuration.
    pub appliance: ApplianceConfig,

    /// Reconciliation configuration.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Connection settings for the pfSense appliance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceConfig {
    /// Base URL of the appliance (e.g., "https://pfsense.example.com").
    pub base_url: String,

    /// Path to the credentials file containing "user:password".
    /// Read once at startup; the process exits if it is absent or empty.
    pub credentials_file: PathBuf,

    /// Per-request timeout in seconds. Bounds every HTTP call so one hung
    /// request cannot wedge a reconciliation pass indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Accept the appliance's TLS certificate without verification.
    /// pfSense boxes on private networks ship self-signed certificates.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

/// Reconciliation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between reconciliation passes. Passes are serialized: a slow
    /// pass defers the next tick rather than overlapping with it.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Domain suffix for created overrides (e.g., "proxmox.local").
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Highest override ID probed during enumeration. The appliance signals
    /// end-of-data with a non-200 envelope code; this ceiling only guards
    /// against that signal never arriving, and hitting it is an error.
    #[serde(default = "default_max_override_id")]
    pub max_override_id: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            domain: default_domain(),
            max_override_id: default_max_override_id(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "pfsense_dns_sync=debug,warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus metrics exporter address.
    #[serde(default)]
    pub prometheus_addr: Option<std::net::SocketAddr>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prometheus_addr: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    5
}

fn default_domain() -> String {
    "proxmox.local".to_string()
}

fn default_max_override_id() -> u32 {
    10_000
}
