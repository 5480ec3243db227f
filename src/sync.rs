//! Scheduling loop and service lifecycle.
//!
//! Passes are serialized: each tick's pass is awaited on the loop task before
//! the next tick is processed, and missed ticks are delayed rather than
//! bursted. Two passes can therefore never race each other into creating the
//! same override. The cost is interval drift while a pass runs long, which
//! does not matter for this workload.
//!
//! Pass errors are logged and absorbed; the next tick is the retry mechanism.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::client::Transport;
use crate::config::SyncConfig;
use crate::metrics::{self, PassOutcome, Timer};
use crate::reconcile::Reconciler;

/// Background service that reconciles overrides against leases on a fixed
/// interval until cancelled.
pub struct SyncService<T> {
    config: SyncConfig,
    reconciler: Reconciler<T>,
}

impl<T: Transport> SyncService<T> {
    /// Create a service over the given transport.
    pub fn new(config: SyncConfig, transport: T) -> Self {
        let reconciler = Reconciler::new(config.clone(), transport);
        Self { config, reconciler }
    }

    /// Run reconciliation passes until `shutdown` is cancelled.
    ///
    /// The first pass runs immediately; subsequent passes follow the
    /// configured interval.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.config.interval_secs,
            domain = %self.config.domain,
            "starting sync loop"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_one_pass().await;
                }
                _ = shutdown.cancelled() => {
                    info!("sync loop shutting down");
                    return;
                }
            }
        }
    }

    async fn run_one_pass(&self) {
        let timer = Timer::start();

        match self.reconciler.run_pass().await {
            Ok(summary) => {
                info!(
                    existing = summary.existing,
                    leases = summary.leases,
                    created = summary.created,
                    "reconciliation pass complete"
                );
                metrics::record_pass(PassOutcome::Success, timer.elapsed());
                metrics::record_pass_counts(summary.existing, summary.created);
            }
            Err(e) => {
                error!(error = %e, "reconciliation pass failed");
                metrics::record_pass(PassOutcome::Error, timer.elapsed());
            }
        }
    }
}
