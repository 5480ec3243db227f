//! DHCP lease retrieval.
//!
//! One call returns the whole lease table: `limit=0&offset=0` is the
//! appliance's spelling of "no pagination". Unlike override enumeration there
//! is no partial-failure tolerance here; a reconciliation pass without the
//! lease table is meaningless, so every failure surfaces to the caller.

use tracing::debug;

use crate::client::Transport;
use crate::error::SyncError;
use crate::metrics;
use crate::model::{ApiEnvelope, DhcpLease};

/// Lease listing path; `limit=0` requests all leases unpaginated.
const LEASES_PATH: &str = "/api/v2/status/dhcp_server/leases?limit=0&offset=0";

/// Fetch all current DHCP leases from the appliance.
pub async fn fetch_leases<T: Transport + ?Sized>(
    transport: &T,
) -> Result<Vec<DhcpLease>, SyncError> {
    let response = transport.get(LEASES_PATH).await?;

    let envelope: ApiEnvelope<Vec<DhcpLease>> = serde_json::from_slice(&response.body)
        .map_err(|source| SyncError::Decode {
            context: "DHCP lease listing",
            source,
        })?;

    if envelope.code != 200 {
        return Err(SyncError::RemoteStatus {
            code: envelope.code,
            status: envelope.status,
        });
    }

    debug!(leases = envelope.data.len(), "fetched DHCP lease table");
    metrics::record_lease_count(envelope.data.len());

    Ok(envelope.data)
}
