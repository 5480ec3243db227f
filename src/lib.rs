//! pfsense-dns-sync - Keeps pfSense DNS host overrides in sync with DHCP leases.
//!
//! This crate provides a background service that periodically reconciles the
//! DNS-resolver host-override table on a pfSense appliance against its DHCP
//! lease table. Every lease whose IP address has no matching override gets one
//! created, so freshly leased machines become resolvable without manual entry.
//!
//! ## Features
//!
//! - Full override enumeration over an ID-probing API with no list endpoint
//! - Exact IP-keyed set difference between leases and existing overrides
//! - Idempotent, append-only: overrides are never updated or deleted
//! - Serialized reconciliation passes with graceful shutdown support
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       pfsense-dns-sync                         │
//! │                                                                │
//! │  ┌──────────────┐   every tick   ┌───────────────────────┐    │
//! │  │ SyncService  │───────────────▶│      Reconciler       │    │
//! │  │ (interval)   │                │                       │    │
//! │  └──────────────┘                │  enumerate overrides  │    │
//! │                                  │  fetch DHCP leases    │    │
//! │                                  │  diff by IP address   │    │
//! │                                  │  create the missing   │    │
//! │                                  └──────────┬────────────┘    │
//! │                                             │                 │
//! │                                  ┌──────────▼────────────┐    │
//! │                                  │   ApplianceClient     │───────▶ pfSense
//! │                                  │ (HTTPS + basic auth)  │    │    REST API
//! │                                  └───────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reconciliation
//!
//! ```text
//! GET host_override?id=0,1,2,...   → existing overrides (until non-200 code)
//! GET dhcp_server/leases?limit=0   → all active leases
//! {lease.ip} − {override.ip[0]}    → creation set
//! POST host_override per element   → fail-fast on the first error
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use pfsense_dns_sync::{ApplianceClient, Config, Credentials, SyncService};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let creds = Credentials::load(&config.appliance.credentials_file).unwrap();
//!     let client = ApplianceClient::new(&config.appliance, creds).unwrap();
//!
//!     let shutdown = CancellationToken::new();
//!     let service = SyncService::new(config.sync, client);
//!     service.run(shutdown).await;
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod lease;
pub mod metrics;
pub mod model;
pub mod overrides;
pub mod reconcile;
pub mod sync;
pub mod telemetry;

// Re-export main types
pub use client::{ApplianceClient, Credentials, Transport};
pub use config::{ApplianceConfig, Config, SyncConfig, TelemetryConfig};
pub use error::SyncError;
pub use reconcile::{PassSummary, Reconciler};
pub use sync::SyncService;
