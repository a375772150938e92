//! Risk Assessment

use std::collections::BTreeMap;
use std::sync::Arc;

use alerting::{Classifier, Report, RiskTier};
use fuzzy_engine::{EvalError, InferenceSystem, Inputs};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{MonitorConfig, NoRulePolicy};
use crate::reference::{self, CURRENT, RISK, TEMPERATURE, VOLTAGE_VARIATION};
use crate::MonitorError;

/// One set of sensor readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature (°C)
    pub temperature: f64,
    /// Current (A)
    pub current: f64,
    /// Voltage variation (%)
    pub voltage_variation: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, current: f64, voltage_variation: f64) -> Self {
        Self {
            temperature,
            current,
            voltage_variation,
        }
    }

    /// Crisp inputs for the reference system
    pub fn to_inputs(&self) -> Inputs {
        Inputs::from_iter([
            (TEMPERATURE, self.temperature),
            (CURRENT, self.current),
            (VOLTAGE_VARIATION, self.voltage_variation),
        ])
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            (TEMPERATURE.to_string(), self.temperature),
            (CURRENT.to_string(), self.current),
            (VOLTAGE_VARIATION.to_string(), self.voltage_variation),
        ])
    }
}

/// Outcome of assessing one reading
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub reading: SensorReading,
    /// Crisp risk score; `None` when the no-rule fallback decided the tier
    pub score: Option<f64>,
    pub tier: RiskTier,
}

impl Assessment {
    /// Whether the tier came from the no-rule fallback
    pub fn is_fallback(&self) -> bool {
        self.score.is_none()
    }

    pub fn to_report(&self) -> Report {
        Report::new(self.reading.to_map(), self.score, self.tier)
    }
}

/// Scores readings with the reference system and classifies the result
#[derive(Debug, Clone)]
pub struct RiskMonitor {
    system: Arc<InferenceSystem>,
    classifier: Classifier,
    policy: NoRulePolicy,
}

impl RiskMonitor {
    pub fn new(system: Arc<InferenceSystem>, classifier: Classifier, policy: NoRulePolicy) -> Self {
        Self {
            system,
            classifier,
            policy,
        }
    }

    /// Build the reference system and classifier described by `config`
    pub fn from_config(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let system = reference::build_system(&config.resolution)?.with_defuzz(config.defuzz);
        let classifier = Classifier::new(config.thresholds)?;
        Ok(Self::new(Arc::new(system), classifier, config.no_rule_policy))
    }

    pub fn system(&self) -> &Arc<InferenceSystem> {
        &self.system
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn policy(&self) -> NoRulePolicy {
        self.policy
    }

    /// Score and classify one reading
    pub fn assess(&self, reading: SensorReading) -> Result<Assessment, MonitorError> {
        let assessment = match self.system.infer(&reading.to_inputs())?.defuzzify(RISK) {
            Ok(score) => Assessment {
                reading,
                score: Some(score),
                tier: self.classifier.classify(score),
            },
            Err(EvalError::NoApplicableRule(output)) => match self.policy {
                NoRulePolicy::Refuse => {
                    metrics::counter!("risk_assessments_refused_total").increment(1);
                    return Err(EvalError::NoApplicableRule(output).into());
                }
                NoRulePolicy::MaximalCaution => {
                    warn!(?reading, "No rule fired for {}, escalating", output);
                    Assessment {
                        reading,
                        score: None,
                        tier: RiskTier::CriticalAlert,
                    }
                }
            },
            Err(e) => return Err(e.into()),
        };

        debug!(
            "Assessed {:?}: score={:?} tier={}",
            reading,
            assessment.score,
            assessment.tier.as_str()
        );
        metrics::counter!("risk_assessments_total", "tier" => assessment.tier.as_str()).increment(1);

        Ok(assessment)
    }
}
