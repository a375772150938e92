//! Alerting
//!
//! Maps crisp risk scores to alert tiers and hands assessments to
//! reporting sinks.

mod report;
mod tier;

pub use report::{LogReporter, MemoryReporter, Report, Reporter};
pub use tier::{Classifier, RiskTier, TierThresholds};

use thiserror::Error;

/// Errors in alert configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlertError {
    #[error("Tier thresholds must be finite and ordered moderate < high < critical, got {moderate}, {high}, {critical}")]
    UnorderedThresholds {
        moderate: f64,
        high: f64,
        critical: f64,
    },
}
