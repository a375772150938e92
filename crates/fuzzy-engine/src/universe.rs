//! Universe of Discourse

use serde::{Deserialize, Serialize};

/// Largest number of sample points a universe may hold
pub const MAX_SAMPLES: usize = 10_000_000;

// Tolerate representation error so that e.g. [0, 1] at 0.1 keeps 1.0
const SPAN_EPSILON: f64 = 1e-9;

/// Closed interval `[min, max]` sampled at a fixed step.
///
/// Sample `i` is `min + i * step`, computed from the index rather than
/// accumulated, for `i` in `0..len()`. The step is the resolution of every
/// aggregated set and centroid built over this universe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

impl Universe {
    /// Create a universe, or `None` if the bounds are unordered, the step
    /// is not a positive finite number, or the grid would exceed
    /// [`MAX_SAMPLES`] points.
    pub fn new(min: f64, max: f64, step: f64) -> Option<Self> {
        let finite = min.is_finite() && max.is_finite() && step.is_finite();
        if !(finite && min <= max && step > 0.0) {
            return None;
        }
        let count = ((max - min) / step + SPAN_EPSILON).floor() + 1.0;
        if count.is_finite() && count <= MAX_SAMPLES as f64 {
            Some(Self { min, max, step })
        } else {
            None
        }
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sample spacing
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample points
    pub fn len(&self) -> usize {
        let span = (self.max - self.min) / self.step;
        ((span + SPAN_EPSILON).floor() as usize).saturating_add(1).min(MAX_SAMPLES)
    }

    /// Always false: a valid universe holds at least `min`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `x` lies within the declared bounds
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Iterate over the sample points
    pub fn samples(&self) -> Samples {
        Samples {
            start: self.min,
            end: self.max,
            step: self.step,
            index: 0,
            len: self.len(),
        }
    }
}

/// Iterator over the sample points of a [`Universe`]
#[derive(Debug, Clone)]
pub struct Samples {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Iterator for Samples {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some((self.start + self.step * i as f64).min(self.end))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Samples {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_grid() {
        let u = Universe::new(0.0, 100.0, 1.0).unwrap();
        assert_eq!(u.len(), 101);
        let points: Vec<f64> = u.samples().collect();
        assert_eq!(points.first(), Some(&0.0));
        assert_eq!(points.last(), Some(&100.0));
        assert_eq!(points[42], 42.0);
    }

    #[test]
    fn test_fractional_step_keeps_upper_bound() {
        let u = Universe::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(u.len(), 11);
        let last = u.samples().last().unwrap();
        assert!((last - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_not_dividing_span() {
        let u = Universe::new(0.0, 10.0, 3.0).unwrap();
        let points: Vec<f64> = u.samples().collect();
        assert_eq!(points, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_degenerate_interval() {
        let u = Universe::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(u.samples().collect::<Vec<_>>(), vec![5.0]);
    }

    #[test]
    fn test_invalid_universe() {
        assert!(Universe::new(10.0, 0.0, 1.0).is_none());
        assert!(Universe::new(0.0, 10.0, 0.0).is_none());
        assert!(Universe::new(0.0, 10.0, -1.0).is_none());
        assert!(Universe::new(0.0, f64::INFINITY, 1.0).is_none());
    }

    #[test]
    fn test_sample_count_is_capped() {
        assert!(Universe::new(0.0, 1e300, 1e-10).is_none());
        assert!(Universe::new(0.0, 100.0, 1e-12).is_none());
        assert!(Universe::new(0.0, MAX_SAMPLES as f64, 1.0).is_none());

        let largest = Universe::new(0.0, (MAX_SAMPLES - 1) as f64, 1.0).unwrap();
        assert_eq!(largest.len(), MAX_SAMPLES);
        assert_eq!(largest.samples().len(), MAX_SAMPLES);
    }

    #[test]
    fn test_contains() {
        let u = Universe::new(0.0, 20.0, 1.0).unwrap();
        assert!(u.contains(0.0));
        assert!(u.contains(20.0));
        assert!(!u.contains(20.5));
        assert!(!u.contains(-0.1));
    }
}
