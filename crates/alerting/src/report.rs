//! Assessment Reporting

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::tier::RiskTier;

/// One assessed set of readings, ready for display or logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Crisp inputs keyed by variable name
    pub inputs: BTreeMap<String, f64>,
    /// Crisp risk score; absent when no rule fired and a fallback tier was used
    pub score: Option<f64>,
    pub tier: RiskTier,
    pub timestamp_ms: u64,
}

impl Report {
    pub fn new(inputs: BTreeMap<String, f64>, score: Option<f64>, tier: RiskTier) -> Self {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            inputs,
            score,
            tier,
            timestamp_ms,
        }
    }

    /// JSON form of the report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Sink for assessments. Receives results only; never affects inference.
pub trait Reporter: Send + Sync {
    fn report(&self, report: &Report);
}

/// Reports through `tracing`, at a level matching the tier
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, report: &Report) {
        let inputs = report
            .inputs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        let score = report
            .score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "n/a".to_string());

        match report.tier {
            RiskTier::CriticalAlert => {
                error!(tier = report.tier.as_str(), "{} | risk {} | {}", inputs, score, report.tier.message())
            }
            RiskTier::High => {
                warn!(tier = report.tier.as_str(), "{} | risk {} | {}", inputs, score, report.tier.message())
            }
            RiskTier::Moderate | RiskTier::Low => {
                info!(tier = report.tier.as_str(), "{} | risk {} | {}", inputs, score, report.tier.message())
            }
        }
    }
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere while holding the lock leaves the list intact
    fn lock(&self) -> MutexGuard<'_, Vec<Report>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the reports received so far
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, report: &Report) {
        self.lock().push(report.clone());
    }
}
