//! Membership Functions

use serde::{Deserialize, Serialize};

/// Degree of membership of a crisp value in a fuzzy term.
///
/// Only piecewise-linear shapes are provided. New shapes are added as new
/// variants; every variant must stay total over `f64` and return `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MembershipFunction {
    /// Rises over `[a, b]`, peaks at `b`, falls over `[b, c]`
    Triangular { a: f64, b: f64, c: f64 },
}

impl MembershipFunction {
    /// Create a triangular function, or `None` if the control points are
    /// not finite or not ordered `a <= b <= c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Option<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if finite && a <= b && b <= c {
            Some(Self::Triangular { a, b, c })
        } else {
            None
        }
    }

    /// Evaluate the degree of membership of `x`.
    ///
    /// Total: values outside the support (and NaN) yield 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                let degree = if x.is_nan() {
                    0.0
                } else if x == b {
                    // Shoulders (a == b or b == c) peak at their edge
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                };
                degree.clamp(0.0, 1.0)
            }
        }
    }

    /// Closed interval outside of which membership is zero
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
        }
    }

    /// Point of full membership
    pub fn peak(&self) -> f64 {
        match *self {
            Self::Triangular { b, .. } => b,
        }
    }
}
