//! Wire types for the pfSense v2 REST API.
//!
//! Every endpoint wraps its payload in the same JSON envelope:
//! `{code, status, response_id, message, data}`. The `code` field carries the
//! application-level status; the appliance uses a non-200 `code` (not an HTTP
//! 404) to signal "no such record".

use serde::{Deserialize, Serialize};

/// Generic response envelope returned by every appliance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application-level status code; 200 means success.
    pub code: i64,

    /// Human-readable status (e.g., "ok", "not found").
    #[serde(default)]
    pub status: String,

    /// Opaque per-response identifier.
    #[serde(default)]
    pub response_id: String,

    /// Human-readable message accompanying the status.
    #[serde(default)]
    pub message: String,

    /// Endpoint-specific payload.
    pub data: T,
}

/// A DNS host override that already exists on the appliance.
///
/// Read-only from this service's perspective; the first entry of `ip` is the
/// dedup key for reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct ExistingOverride {
    /// Numeric ID assigned by the appliance (the enumeration index).
    pub id: i64,

    /// Hostname portion of the override.
    #[serde(default)]
    pub host: String,

    /// Domain portion of the override.
    #[serde(default)]
    pub domain: String,

    /// IP addresses the override resolves to. Non-empty for well-formed
    /// records, but the appliance is not trusted on that.
    #[serde(default)]
    pub ip: Vec<String>,

    /// Free-form description.
    #[serde(default)]
    pub descr: String,

    /// Alias records; shape varies by appliance version, so left loose.
    #[serde(default)]
    pub aliases: serde_json::Value,
}

impl ExistingOverride {
    /// The primary IP address, used as the membership key when diffing
    /// against the lease table.
    pub fn primary_ip(&self) -> Option<&str> {
        self.ip.first().map(String::as_str)
    }
}

/// A DNS host override to be created on the appliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostOverride {
    /// Hostname portion.
    pub host: String,

    /// Domain portion.
    pub domain: String,

    /// IP addresses the override resolves to.
    pub ip: Vec<String>,

    /// Free-form description.
    pub descr: String,

    /// Alias records; always submitted empty.
    pub aliases: Vec<serde_json::Value>,
}

impl HostOverride {
    /// Build the override for a lease: the lease hostname under `domain`,
    /// resolving to the lease IP, described as a Proxmox VM.
    pub fn for_lease(lease: &DhcpLease, domain: &str) -> Self {
        Self {
            host: lease.hostname.clone(),
            domain: domain.to_string(),
            ip: vec![lease.ip.clone()],
            descr: format!("{} Proxmox VM", lease.hostname),
            aliases: Vec::new(),
        }
    }
}

/// A DHCP lease as reported by the appliance.
///
/// Only `ip` and `hostname` feed reconciliation decisions; the rest is
/// status/timing metadata carried through for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct DhcpLease {
    /// Numeric lease ID.
    #[serde(default)]
    pub id: i64,

    /// Leased IP address.
    pub ip: String,

    /// Client MAC address.
    #[serde(default)]
    pub mac: String,

    /// Client-reported hostname.
    #[serde(default)]
    pub hostname: String,

    /// Interface the lease was served on; null for some lease states.
    #[serde(default, rename = "if")]
    pub interface: serde_json::Value,

    /// Lease start time.
    #[serde(default)]
    pub starts: String,

    /// Lease end time.
    #[serde(default)]
    pub ends: String,

    /// Lease state (e.g., "active", "expired").
    #[serde(default)]
    pub active_status: String,

    /// Whether the client currently responds (e.g., "online", "offline").
    #[serde(default)]
    pub online_status: String,

    /// Free-form description; null for most leases.
    #[serde(default)]
    pub descr: serde_json::Value,
}
