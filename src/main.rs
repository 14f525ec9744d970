// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:      Configuration structs loaded from JSON
// - error:       Error taxonomy
// - schema:      Remote results, metric samples, snapshots
// - util:        JSON field extraction, path helpers
// - adapters:    Remote adapters and collector registration
// - normalize:   RemoteResult -> metric samples
// - collector:   Registry and collection orchestrator
// - exposition:  Prometheus text encoding
// - server:      HTTP scrape endpoint
// - stats:       Runtime counters of the exporter itself
//
mod adapters;
mod collector;
mod config;
mod error;
mod exposition;
mod normalize;
mod schema;
mod server;
mod stats;
mod util;

// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use rustls::crypto::{CryptoProvider, ring};

use collector::runner::Orchestrator;
use config::load_config;

// ------------------------------------------------------------
// CLI
// ------------------------------------------------------------
#[derive(Parser)]
#[command(name = "chia-exporter", about = "Prometheus exporter for Chia node services", version)]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json", env = "CHIA_EXPORTER_CONFIG")]
    config: PathBuf,
}

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Initialize logging and the rustls crypto backend
// - Load configuration (once; no reload)
// - Register collectors and resolve the enabled set
// - Serve scrapes until the process is stopped
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --------------------------------------------------------
    // rustls >= 0.23 requires a process-wide CryptoProvider
    // when more than one backend is compiled in. Installed
    // before any HTTP client is built.
    // --------------------------------------------------------
    CryptoProvider::install_default(ring::default_provider())
        .map_err(|_| anyhow::anyhow!("failed to install rustls CryptoProvider"))?;

    let config = load_config(&args.config)?;

    let registry = adapters::build_registry(&config)?;
    info!("Registered collectors: {}", registry.names().join(", "));

    let enabled = registry.enabled_collectors(config.metrics.as_slice());

    let orchestrator = Arc::new(Orchestrator::new(enabled, config.timeout()));
    info!(
        "Enabled collectors: {}",
        orchestrator.collector_names().join(", ")
    );

    if config.stats_interval_secs > 0 {
        stats::spawn_reporter(Duration::from_secs(config.stats_interval_secs));
    }

    // --------------------------------------------------------
    // Blocks for the lifetime of the process. Bind failures
    // surface here and end the process with a non-zero status.
    // --------------------------------------------------------
    server::serve(config.port, orchestrator).await
}
