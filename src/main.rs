use tracing_subscriber::EnvFilter;

use meatboard::config::Config;
use meatboard::report;
use meatboard::snapshot::Snapshot;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("meatboard=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🥩 meatboard starting...");

    // Load configuration
    let config = Config::load("config.toml");
    tracing::info!("Config: {:?}", config);

    // Snapshot path: first CLI argument, else the configured one
    let snapshot_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.snapshot.path.clone());

    let snapshot = match Snapshot::load(&snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Cannot load {snapshot_path}: {e}");
            std::process::exit(1);
        }
    };

    if config.wallets.is_empty() {
        tracing::warn!("No wallets configured, wallet-relative figures will be empty");
    }

    let report = report::build(&snapshot, &config);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}
