//! One reconciliation pass: enumerate, fetch, diff, create.
//!
//! The diff is keyed purely by IP address: a lease whose IP already appears
//! as some override's primary IP is left alone, everything else gets an
//! override created. Nothing is persisted locally, so idempotence rests
//! entirely on this membership check; the appliance is not assumed to reject
//! duplicates itself.
//!
//! Overrides are only ever added. Stale overrides for expired leases are
//! left untouched.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::client::Transport;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::lease::fetch_leases;
use crate::metrics;
use crate::model::{DhcpLease, ExistingOverride, HostOverride};
use crate::overrides::enumerate_overrides;

/// Creation path for host overrides.
const OVERRIDE_PATH: &str = "/api/v2/services/dns_resolver/host_override";

/// Counts from one completed reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Overrides that already existed on the appliance.
    pub existing: usize,

    /// Leases reported by the appliance.
    pub leases: usize,

    /// Overrides created this pass.
    pub created: usize,
}

/// Compute the overrides to create: one per lease IP that has no existing
/// override, deduplicated by IP within the lease set as well.
pub fn creation_set(
    existing: &[ExistingOverride],
    leases: &[DhcpLease],
    domain: &str,
) -> Vec<HostOverride> {
    let mut known_ips: HashSet<&str> = existing
        .iter()
        .filter_map(ExistingOverride::primary_ip)
        .collect();

    let mut missing = Vec::new();
    for lease in leases {
        if known_ips.contains(lease.ip.as_str()) {
            continue;
        }

        known_ips.insert(lease.ip.as_str());
        missing.push(HostOverride::for_lease(lease, domain));
    }

    missing
}

/// Drives one full reconciliation pass against an injected [`Transport`].
#[derive(Debug, Clone)]
pub struct Reconciler<T> {
    transport: Arc<T>,
    config: SyncConfig,
}

impl<T: Transport> Reconciler<T> {
    /// Create a reconciler over the given transport.
    pub fn new(config: SyncConfig, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
        }
    }

    /// Run one pass: enumerate overrides, fetch leases, create the missing
    /// overrides.
    ///
    /// A lease-fetch failure aborts the pass before any creation call. A
    /// creation failure aborts the remainder of the pass; the next pass
    /// retries naturally since nothing is persisted locally.
    pub async fn run_pass(&self) -> Result<PassSummary, SyncError> {
        let existing =
            enumerate_overrides(self.transport.as_ref(), self.config.max_override_id).await?;
        let leases = fetch_leases(self.transport.as_ref()).await?;

        let missing = creation_set(&existing, &leases, &self.config.domain);
        debug!(
            existing = existing.len(),
            leases = leases.len(),
            missing = missing.len(),
            "computed creation set"
        );

        for hostoverride in &missing {
            let body = serde_json::to_value(hostoverride).map_err(|source| SyncError::Decode {
                context: "host override submission",
                source,
            })?;

            let response = self.transport.post_json(OVERRIDE_PATH, body).await?;
            debug!(
                status = %response.status,
                body = %String::from_utf8_lossy(&response.body),
                "override creation response"
            );

            info!(
                host = %hostoverride.host,
                domain = %hostoverride.domain,
                ip = ?hostoverride.ip,
                "created host override"
            );
            metrics::record_override_created();
        }

        Ok(PassSummary {
            existing: existing.len(),
            leases: leases.len(),
            created: missing.len(),
        })
    }
}
