//! Override enumeration over the appliance's ID-probing lookup endpoint.
//!
//! The appliance exposes host overrides only as point lookups by ascending
//! numeric ID, one record per GET, with no list endpoint. End-of-data is
//! signalled in-band: the first response whose envelope `code` is not 200
//! means no override exists at that ID or beyond.
//!
//! Fault policy: a transport failure or undecodable body for a single ID is
//! logged and skipped, so one bad probe never aborts the whole enumeration.
//! Only the non-200 envelope code terminates the scan.

use tracing::{debug, warn};

use crate::client::Transport;
use crate::error::SyncError;
use crate::metrics::{self, ProbeOutcome};
use crate::model::{ApiEnvelope, ExistingOverride};

/// Lookup path for a single override by ID.
const OVERRIDE_PATH: &str = "/api/v2/services/dns_resolver/host_override";

/// Outcome of decoding one lookup response body.
enum Lookup {
    /// An override exists at this ID.
    Override(ExistingOverride),
    /// The appliance signalled that no override exists at this ID.
    End { code: i64, status: String },
}

/// Decode a lookup response.
///
/// The success shape carries the override under `data`. When an ID does not
/// exist the appliance reuses the envelope but puts an array under `data`,
/// which fails the success-shape decode; the fallback re-decodes with a loose
/// `data` just to recover the envelope code. A body that decodes neither way,
/// or that claims code 200 without a well-formed override, is an error.
fn decode_lookup(body: &[u8]) -> Result<Lookup, SyncError> {
    match serde_json::from_slice::<ApiEnvelope<ExistingOverride>>(body) {
        Ok(envelope) if envelope.code == 200 => Ok(Lookup::Override(envelope.data)),
        Ok(envelope) => Ok(Lookup::End {
            code: envelope.code,
            status: envelope.status,
        }),
        Err(primary) => {
            let fallback = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body);
            match fallback {
                Ok(envelope) if envelope.code != 200 => Ok(Lookup::End {
                    code: envelope.code,
                    status: envelope.status,
                }),
                // Code 200 with a malformed override payload: treat like any
                // other undecodable body so the caller skips this ID.
                Ok(_) | Err(_) => Err(SyncError::Decode {
                    context: "host override lookup",
                    source: primary,
                }),
            }
        }
    }
}

/// Enumerate all existing host overrides by probing IDs `0..ceiling`.
///
/// Returns the overrides in ascending-ID order. Order carries no meaning
/// downstream; the reconciler only needs set membership by IP.
///
/// Exhausting the ceiling without ever seeing the appliance's end-of-data
/// signal is an operational error, not a truncated success.
pub async fn enumerate_overrides<T: Transport + ?Sized>(
    transport: &T,
    ceiling: u32,
) -> Result<Vec<ExistingOverride>, SyncError> {
    let mut overrides = Vec::new();

    for id in 0..ceiling {
        let path = format!("{}?id={}", OVERRIDE_PATH, id);

        let response = match transport.get(&path).await {
            Ok(response) => response,
            Err(e) => {
                warn!(id, error = %e, "override lookup failed, skipping ID");
                metrics::record_override_probe(ProbeOutcome::Skipped);
                continue;
            }
        };

        match decode_lookup(&response.body) {
            Ok(Lookup::Override(existing)) => {
                debug!(
                    id,
                    host = %existing.host,
                    ip = ?existing.ip,
                    "found existing override"
                );
                metrics::record_override_probe(ProbeOutcome::Found);
                overrides.push(existing);
            }
            Ok(Lookup::End { code, status }) => {
                debug!(id, code, status = %status, "enumeration terminator");
                metrics::record_override_probe(ProbeOutcome::Terminator);
                return Ok(overrides);
            }
            Err(e) => {
                warn!(id, error = %e, "override lookup body undecodable, skipping ID");
                metrics::record_override_probe(ProbeOutcome::Skipped);
            }
        }
    }

    Err(SyncError::EnumerationCeiling { ceiling })
}
