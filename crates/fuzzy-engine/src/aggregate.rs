//! Implication and Aggregation

use serde::Serialize;

/// Membership degrees of one output over its sampled universe.
///
/// Built fresh for every call; one entry per sample point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSet {
    variable: String,
    degrees: Vec<f64>,
}

impl AggregatedSet {
    /// All-zero set over `len` sample points
    pub fn zeros(variable: &str, len: usize) -> Self {
        Self {
            variable: variable.to_string(),
            degrees: vec![0.0; len],
        }
    }

    /// Output variable name
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// Clip `term` at `strength` (Mamdani implication) and merge it in
    /// with a pointwise max.
    pub fn absorb(&mut self, term: &[f64], strength: f64) {
        debug_assert_eq!(term.len(), self.degrees.len());
        if strength <= 0.0 {
            return;
        }
        for (agg, mu) in self.degrees.iter_mut().zip(term) {
            *agg = f64::max(*agg, f64::min(*mu, strength));
        }
    }

    /// Sum of all degrees
    pub fn mass(&self) -> f64 {
        self.degrees.iter().sum()
    }

    /// Whether every degree is zero
    pub fn is_zero(&self) -> bool {
        self.degrees.iter().all(|d| *d == 0.0)
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}
