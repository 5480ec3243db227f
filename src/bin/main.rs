//! pfsense-dns-sync binary entry point.

use clap::Parser;
use pfsense_dns_sync::{telemetry, ApplianceClient, Config, Credentials, SyncService};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Keeps pfSense DNS host overrides in sync with the DHCP lease table.
#[derive(Parser, Debug)]
#[command(name = "pfsense-dns-sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML).
    #[arg(short, long, default_value = "pfsense-dns-sync.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config: Config = config::Config::builder()
        .add_source(config::File::from(args.config.clone()))
        .add_source(
            config::Environment::with_prefix("DNS_SYNC")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    // Initialize telemetry
    telemetry::init(&config.telemetry).map_err(|e| e as Box<dyn std::error::Error>)?;

    info!(
        config_file = %args.config.display(),
        base_url = %config.appliance.base_url,
        interval_secs = config.sync.interval_secs,
        domain = %config.sync.domain,
        "Starting pfsense-dns-sync"
    );

    // Credentials are required; refuse to start without them
    let credentials = match Credentials::load(&config.appliance.credentials_file) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load credentials: {}", e);
            return Err(e.into());
        }
    };

    let client = ApplianceClient::new(&config.appliance, credentials)?;

    // Setup graceful shutdown
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        signal_token.cancel();
    });

    // Run sync loop until cancelled
    let service = SyncService::new(config.sync, client);
    service.run(shutdown).await;

    info!("pfsense-dns-sync shutdown complete");
    Ok(())
}

/// Wait for ctrl-c or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
