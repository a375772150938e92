//! Monitor configuration

use std::path::Path;

use alerting::TierThresholds;
use fuzzy_engine::DefuzzMethod;
use serde::{Deserialize, Serialize};

use crate::monitor::SensorReading;
use crate::MonitorError;

/// Prefix of environment overrides, e.g. `RISK_MONITOR__THRESHOLDS__CRITICAL=85`
pub const ENV_PREFIX: &str = "RISK_MONITOR";

/// Sampling step of each universe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Temperature grid step (°C)
    pub temperature_step: f64,
    /// Current grid step (A)
    pub current_step: f64,
    /// Voltage variation grid step (%)
    pub voltage_step: f64,
    /// Risk grid step; bounds the precision of the crisp score
    pub risk_step: f64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            temperature_step: 1.0,
            current_step: 1.0,
            voltage_step: 1.0,
            risk_step: 1.0,
        }
    }
}

/// What to do when no rule fires for a reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoRulePolicy {
    /// Return the failure to the caller
    #[default]
    Refuse,
    /// Report the highest tier without a score
    MaximalCaution,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub resolution: ResolutionConfig,
    pub thresholds: TierThresholds,
    pub defuzz: DefuzzMethod,
    pub no_rule_policy: NoRulePolicy,
    pub logging: LoggingConfig,
    /// Readings assessed by the binary on startup
    pub samples: Vec<SensorReading>,
    /// Readings per batch in the streaming evaluator
    pub batch_size: usize,
    /// Max wait for a batch to fill (ms)
    pub batch_timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionConfig::default(),
            thresholds: TierThresholds::default(),
            defuzz: DefuzzMethod::Centroid,
            no_rule_policy: NoRulePolicy::Refuse,
            logging: LoggingConfig::default(),
            samples: vec![
                SensorReading::new(90.0, 370.0, 7.0),
                SensorReading::new(40.0, 120.0, 2.0),
                SensorReading::new(120.0, 450.0, 15.0),
            ],
            batch_size: 16,
            batch_timeout_ms: 50,
        }
    }
}

impl MonitorConfig {
    /// Defaults, overlaid by the file at `path` (if it exists), overlaid by
    /// `RISK_MONITOR__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&MonitorConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: MonitorConfig = settings.try_deserialize()?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Create a cautious config (no-fire readings escalate, finer risk grid)
    pub fn cautious() -> Self {
        Self {
            no_rule_policy: NoRulePolicy::MaximalCaution,
            resolution: ResolutionConfig {
                risk_step: 0.5,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
