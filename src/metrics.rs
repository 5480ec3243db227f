//! Metrics instrumentation for pfsense-dns-sync.
//!
//! All metrics are prefixed with `dns_sync.`

use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Record a completed reconciliation pass.
pub fn record_pass(outcome: PassOutcome, duration: std::time::Duration) {
    let outcome_str = match outcome {
        PassOutcome::Success => "success",
        PassOutcome::Error => "error",
    };

    counter!("dns_sync.pass.count", "outcome" => outcome_str).increment(1);
    histogram!("dns_sync.pass.duration.seconds", "outcome" => outcome_str)
        .record(duration.as_secs_f64());
}

/// Reconciliation pass outcome for metrics.
#[derive(Debug, Clone, Copy)]
pub enum PassOutcome {
    /// The pass completed, creating zero or more overrides.
    Success,
    /// The pass aborted with an error.
    Error,
}

/// Record one override enumeration probe.
pub fn record_override_probe(outcome: ProbeOutcome) {
    let outcome_str = match outcome {
        ProbeOutcome::Found => "found",
        ProbeOutcome::Skipped => "skipped",
        ProbeOutcome::Terminator => "terminator",
    };

    counter!("dns_sync.enumeration.probe.count", "outcome" => outcome_str).increment(1);
}

/// Enumeration probe outcomes.
#[derive(Debug, Clone, Copy)]
pub enum ProbeOutcome {
    /// The probed ID held an override.
    Found,
    /// The probe failed (transport or decode) and the ID was skipped.
    Skipped,
    /// The probe hit the appliance's end-of-data signal.
    Terminator,
}

/// Record an override created on the appliance.
pub fn record_override_created() {
    counter!("dns_sync.override.created.count").increment(1);
}

/// Record the size of the fetched lease table.
pub fn record_lease_count(leases: usize) {
    gauge!("dns_sync.leases.count").set(leases as f64);
}

/// Record state counts from a completed pass.
pub fn record_pass_counts(existing: usize, created: usize) {
    gauge!("dns_sync.overrides.existing.count").set(existing as f64);
    counter!("dns_sync.overrides.created.total").increment(created as u64);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
