//! AutoCare - Main Entry Point
//!
//! Opens the store, follows the vehicle list and logs every change until
//! Ctrl+C.

use anyhow::Result;
use autocare_app::{init_tracing, App, AppConfig};
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = AppConfig::from_env()?;

    // 2. Initialize logging
    init_tracing(config.log_format);
    info!("AutoCare v{} starting...", VERSION);

    // 3. Open database and wire dependencies
    let app = App::start(&config).await?;

    // 4. Follow the vehicle list
    let mut vehicles = app.vehicles().observe_all();
    let watcher = tokio::spawn(async move {
        while let Some(result) = vehicles.next().await {
            match result {
                Ok(list) => info!(vehicles = list.len(), "Vehicle list updated"),
                Err(e) => warn!(error = %e, "Vehicle subscription failed"),
            }
        }
    });

    info!("System ready. Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    watcher.abort();
    app.shutdown().await;

    Ok(())
}
