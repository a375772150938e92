//! Risk Monitor - Main Entry Point

use std::path::PathBuf;

use alerting::LogReporter;
use risk_monitor::{init_logging, MonitorConfig, RiskMonitor, RiskStream};
use tracing::info;

/// Environment variable naming the config file
const CONFIG_PATH_VAR: &str = "RISK_MONITOR_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let config = MonitorConfig::load(path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== Risk Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let monitor = RiskMonitor::from_config(&config)?;
    let (tx, mut stream) = RiskStream::channel(config.batch_size, config.batch_timeout_ms);

    let samples = config.samples.clone();
    let producer = tokio::spawn(async move {
        for reading in samples {
            if tx.send(reading).await.is_err() {
                break;
            }
        }
    });

    let stats = stream.run(&monitor, &LogReporter).await;
    producer.await?;

    info!(
        "Done: {} assessed, {} failed in {} batches",
        stats.assessed, stats.failed, stats.batches
    );
    Ok(())
}
