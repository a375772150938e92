//! Risk Monitor
//!
//! Assesses operational risk from temperature, current and voltage
//! variation readings with the reference fuzzy model, then classifies and
//! reports each score.

pub mod config;
pub mod monitor;
pub mod reference;
pub mod stream;

pub use config::{LoggingConfig, MonitorConfig, NoRulePolicy, ResolutionConfig};
pub use monitor::{Assessment, RiskMonitor, SensorReading};
pub use stream::{RiskStream, StreamStats};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Monitor errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Model error: {0}")]
    Model(#[from] fuzzy_engine::ConfigError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] fuzzy_engine::EvalError),

    #[error("Alert error: {0}")]
    Alert(#[from] alerting::AlertError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Install the global tracing subscriber
pub fn init_logging(logging: &LoggingConfig) -> Result<(), MonitorError> {
    let level: Level = logging
        .level
        .parse()
        .map_err(|_| MonitorError::Logging(format!("unknown level {:?}", logging.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if logging.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    installed.map_err(|e| MonitorError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_rejected() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        assert!(matches!(init_logging(&logging), Err(MonitorError::Logging(_))));
    }
}
