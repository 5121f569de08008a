//! Sampling a function over an evenly spaced grid.

use rayon::prelude::*;

/// An evenly spaced grid of points on a closed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// The first point of the grid.
    pub start: f64,

    /// The last point of the grid.
    pub end: f64,

    /// The number of points in the grid, including both endpoints.
    pub samples: usize,
}

impl Default for Domain {
    /// The interval `[-10, 10]` with a step of `0.05`.
    fn default() -> Self {
        Self { start: -10.0, end: 10.0, samples: 401 }
    }
}

impl Domain {
    /// Creates a new domain.
    pub fn new(start: f64, end: f64, samples: usize) -> Self {
        Self { start, end, samples }
    }

    /// Returns the `idx`-th point of the grid.
    ///
    /// The point is computed from the endpoints directly instead of by accumulating a step, so
    /// that the grid contains the exact endpoints (and `0`, for a symmetric interval with an odd
    /// number of samples).
    pub fn point(&self, idx: usize) -> f64 {
        if self.samples < 2 {
            return self.start;
        }
        let t = idx as f64 / (self.samples - 1) as f64;
        self.start + (self.end - self.start) * t
    }

    /// Returns every point of the grid in ascending order.
    pub fn points(&self) -> Vec<f64> {
        (0..self.samples).map(|idx| self.point(idx)).collect()
    }
}

/// The value of a function at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    /// Returns true if the function is defined at this point, i.e. `y` is finite.
    pub fn is_defined(&self) -> bool {
        self.y.is_finite()
    }
}

/// Samples `f` at every point of the domain, in order.
///
/// Non-finite values are kept as they are; it is up to the consumer to skip them.
pub fn sample<F>(f: F, domain: &Domain) -> Vec<Sample>
where
    F: Fn(f64) -> f64 + Sync,
{
    (0..domain.samples)
        .into_par_iter()
        .map(|idx| {
            let x = domain.point(idx);
            Sample { x, y: f(x) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_is_relative_eq, afe_relative_error_msg, afe_abs, assert_float_relative_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn default_grid() {
        let domain = Domain::default();
        let points = domain.points();
        assert_eq!(points.len(), 401);
        assert_eq!(points[0], -10.0);
        assert_eq!(points[200], 0.0);
        assert_eq!(points[400], 10.0);
        assert_float_relative_eq!(points[1] - points[0], 0.05, 1e-9);
    }

    #[test]
    fn constant_function() {
        let samples = sample(|_| 5.0, &Domain::default());
        assert_eq!(samples.len(), 401);
        assert!(samples.iter().all(|s| s.y == 5.0 && s.is_defined()));
    }

    #[test]
    fn keeps_order_and_undefined_points() {
        let samples = sample(|x| 1.0 / x, &Domain::new(-1.0, 1.0, 5));
        let xs = samples.iter().map(|s| s.x).collect::<Vec<_>>();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(!samples[2].is_defined());
        assert_eq!(samples.iter().filter(|s| s.is_defined()).count(), 4);
    }

    #[test]
    fn degenerate_domains() {
        assert!(sample(|x| x, &Domain::new(0.0, 1.0, 0)).is_empty());
        assert_eq!(sample(|x| x, &Domain::new(3.0, 4.0, 1)), vec![Sample { x: 3.0, y: 3.0 }]);
    }
}
