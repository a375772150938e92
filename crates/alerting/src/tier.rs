//! Risk Tier Classification

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AlertError;

/// Alert tier for a crisp risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Normal conditions
    Low,
    /// Track behaviour
    Moderate,
    /// Monitor closely
    High,
    /// Immediate intervention
    CriticalAlert,
}

impl RiskTier {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::CriticalAlert => "critical_alert",
        }
    }

    /// Operator-facing message
    pub fn message(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk: normal conditions",
            RiskTier::Moderate => "Moderate risk: track behaviour",
            RiskTier::High => "High risk: monitor closely",
            RiskTier::CriticalAlert => "Critical alert: immediate intervention required",
        }
    }
}

/// Lower bounds of the upper three tiers. A score equal to a bound
/// belongs to the tier below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Scores above this are at least moderate (default: 30)
    pub moderate: f64,
    /// Scores above this are at least high (default: 60)
    pub high: f64,
    /// Scores above this are critical (default: 80)
    pub critical: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            moderate: 30.0,
            high: 60.0,
            critical: 80.0,
        }
    }
}

impl TierThresholds {
    /// Check that the bounds are finite and strictly increasing
    pub fn validate(&self) -> Result<(), AlertError> {
        let finite = self.moderate.is_finite() && self.high.is_finite() && self.critical.is_finite();
        if finite && self.moderate < self.high && self.high < self.critical {
            Ok(())
        } else {
            Err(AlertError::UnorderedThresholds {
                moderate: self.moderate,
                high: self.high,
                critical: self.critical,
            })
        }
    }
}

/// Maps crisp scores to tiers with strict `>` comparisons, top down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    thresholds: TierThresholds,
}

impl Classifier {
    pub fn new(thresholds: TierThresholds) -> Result<Self, AlertError> {
        thresholds.validate()?;
        info!("Creating classifier with thresholds: {:?}", thresholds);
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Tier of `score`
    pub fn classify(&self, score: f64) -> RiskTier {
        let t = &self.thresholds;
        if score > t.critical {
            RiskTier::CriticalAlert
        } else if score > t.high {
            RiskTier::High
        } else if score > t.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries_belong_to_lower_tier() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(80.0), RiskTier::High);
        assert_eq!(classifier.classify(80.0001), RiskTier::CriticalAlert);
        assert_eq!(classifier.classify(60.0), RiskTier::Moderate);
        assert_eq!(classifier.classify(60.0001), RiskTier::High);
        assert_eq!(classifier.classify(30.0), RiskTier::Low);
        assert_eq!(classifier.classify(30.0001), RiskTier::Moderate);
    }

    #[test]
    fn test_tier_levels() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(0.0), RiskTier::Low);
        assert_eq!(classifier.classify(45.0), RiskTier::Moderate);
        assert_eq!(classifier.classify(70.0), RiskTier::High);
        assert_eq!(classifier.classify(100.0), RiskTier::CriticalAlert);
    }

    #[test]
    fn test_invalid_thresholds() {
        let swapped = TierThresholds {
            high: 85.0,
            ..Default::default()
        };
        assert!(Classifier::new(swapped).is_err());

        let nan = TierThresholds {
            moderate: f64::NAN,
            ..Default::default()
        };
        assert!(Classifier::new(nan).is_err());
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = Classifier::new(TierThresholds {
            moderate: 10.0,
            high: 20.0,
            critical: 30.0,
        })
        .unwrap();
        assert_eq!(classifier.classify(25.0), RiskTier::High);
    }

    proptest! {
        #[test]
        fn prop_tier_is_monotonic(a in -50.0..150.0f64, b in -50.0..150.0f64) {
            let classifier = Classifier::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classifier.classify(lo) <= classifier.classify(hi));
        }
    }
}
