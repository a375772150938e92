//! Defuzzification

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedSet;
use crate::error::EvalError;
use crate::universe::Universe;

/// Method for reducing an aggregated set to one crisp value.
///
/// All methods work on the discrete samples of the universe, so results
/// are only as precise as its step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzMethod {
    /// Center of gravity: `sum(x * mu) / sum(mu)`
    #[default]
    Centroid,
    /// Point that splits the area under the sampled curve in half, with
    /// the curve taken as piecewise linear between samples
    Bisector,
    /// Mean of the samples at which membership is maximal
    MeanOfMaximum,
    /// Smallest sample at which membership is maximal
    SmallestOfMaximum,
    /// Largest sample at which membership is maximal
    LargestOfMaximum,
}

impl DefuzzMethod {
    /// Crisp value of `set` over `universe`.
    ///
    /// Fails with [`EvalError::NoApplicableRule`] if the set is zero
    /// everywhere; no default value is substituted.
    pub fn defuzzify(&self, set: &AggregatedSet, universe: &Universe) -> Result<f64, EvalError> {
        let mass = set.mass();
        if mass <= 0.0 {
            return Err(EvalError::NoApplicableRule(set.variable().to_string()));
        }
        let samples = || universe.samples().zip(set.degrees().iter().copied());

        let crisp = match self {
            DefuzzMethod::Centroid => {
                let moment: f64 = samples().map(|(x, mu)| x * mu).sum();
                moment / mass
            }
            DefuzzMethod::Bisector => {
                let points: Vec<f64> = universe.samples().collect();
                area_bisector(&points, set.degrees())
            }
            DefuzzMethod::MeanOfMaximum => {
                let peak = set.degrees().iter().copied().fold(0.0, f64::max);
                let (count, sum) = samples()
                    .filter(|(_, mu)| *mu == peak)
                    .fold((0usize, 0.0), |(n, acc), (x, _)| (n + 1, acc + x));
                sum / count as f64
            }
            DefuzzMethod::SmallestOfMaximum | DefuzzMethod::LargestOfMaximum => {
                let peak = set.degrees().iter().copied().fold(0.0, f64::max);
                let mut at_peak = samples().filter(|(_, mu)| *mu == peak).map(|(x, _)| x);
                let found = if *self == DefuzzMethod::SmallestOfMaximum {
                    at_peak.next()
                } else {
                    at_peak.last()
                };
                found.ok_or_else(|| EvalError::NoApplicableRule(set.variable().to_string()))?
            }
        };

        Ok(crisp)
    }
}

/// Bisector of the trapezoid area under `(points, degrees)`.
///
/// Within the segment holding the half-area mark, solves the quadratic for
/// the area under the linear segment.
fn area_bisector(points: &[f64], degrees: &[f64]) -> f64 {
    let segments = || {
        points
            .windows(2)
            .zip(degrees.windows(2))
            .map(|(x, y)| (x[0], x[1], y[0], y[1], (x[1] - x[0]) * (y[0] + y[1]) / 2.0))
    };

    let total: f64 = segments().map(|s| s.4).sum();
    let first = points.first().copied().unwrap_or(0.0);
    if total <= 0.0 {
        // Single-sample universe
        return first;
    }

    let half = total / 2.0;
    let mut cumulative = 0.0;
    for (x1, x2, y1, y2, area) in segments() {
        if cumulative + area >= half {
            let sub = half - cumulative;
            let dx = x2 - x1;
            if y1 == y2 {
                return x1 + sub / y1;
            }
            let root = (2.0 * sub * (y2 - y1) / dx + y1 * y1).max(0.0).sqrt();
            return x1 + (root - y1) * dx / (y2 - y1);
        }
        cumulative += area;
    }

    points.last().copied().unwrap_or(first)
}
