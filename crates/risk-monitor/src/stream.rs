//! Streaming Assessment

use alerting::Reporter;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::monitor::{RiskMonitor, SensorReading};

/// Counts from one run of the stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Readings that produced a report
    pub assessed: usize,
    /// Readings rejected by the monitor
    pub failed: usize,
    /// Batches processed
    pub batches: usize,
}

/// Assesses readings from a channel in batches
pub struct RiskStream {
    receiver: mpsc::Receiver<SensorReading>,
    /// Batch size threshold
    batch_size: usize,
    /// Timeout for batch collection (ms)
    timeout_ms: u64,
}

impl RiskStream {
    pub fn new(receiver: mpsc::Receiver<SensorReading>, batch_size: usize, timeout_ms: u64) -> Self {
        let batch_size = batch_size.max(1);
        info!("Creating risk stream: batch_size={}, timeout={}ms", batch_size, timeout_ms);
        Self {
            receiver,
            batch_size,
            timeout_ms,
        }
    }

    /// Create a channel pair for the stream
    pub fn channel(batch_size: usize, timeout_ms: u64) -> (mpsc::Sender<SensorReading>, Self) {
        let (tx, rx) = mpsc::channel(batch_size.max(1) * 2);
        (tx, Self::new(rx, batch_size, timeout_ms))
    }

    /// Run until every sender is dropped and the channel drains
    pub async fn run(&mut self, monitor: &RiskMonitor, reporter: &dyn Reporter) -> StreamStats {
        info!("Starting risk stream");
        let mut stats = StreamStats::default();

        loop {
            let mut batch = Vec::with_capacity(self.batch_size);
            let timeout_duration = Duration::from_millis(self.timeout_ms);

            match self.receiver.recv().await {
                Some(reading) => batch.push(reading),
                None => {
                    debug!("Risk stream channel closed");
                    break;
                }
            }

            while batch.len() < self.batch_size {
                match timeout(timeout_duration, self.receiver.recv()).await {
                    Ok(Some(reading)) => batch.push(reading),
                    Ok(None) => break,
                    Err(_) => break,
                }
            }

            debug!("Assessing batch of {} readings", batch.len());
            stats.batches += 1;

            for reading in batch {
                match monitor.assess(reading) {
                    Ok(assessment) => {
                        reporter.report(&assessment.to_report());
                        stats.assessed += 1;
                    }
                    Err(e) => {
                        warn!("Assessment of {:?} failed: {}", reading, e);
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(
            "Risk stream stopped: {} assessed, {} failed",
            stats.assessed, stats.failed
        );
        stats
    }
}
