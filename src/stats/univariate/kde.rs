//! Gaussian kernel density estimation.

use crate::stats::univariate::Sample;
use std::f64::consts::PI;

/// A Gaussian kernel density estimator over a fixed sample.
///
/// The estimator is cheap to construct and is rebuilt from scratch whenever
/// the bandwidth changes; each evaluation costs one kernel call per sample
/// value.
pub struct Kde<'a> {
    sample: &'a Sample<f64>,
    // 1 / (2 * bandwidth^2) and bandwidth * sqrt(2 * pi), precomputed once
    // per bandwidth.
    exponent_scale: f64,
    normalizer: f64,
}

impl<'a> Kde<'a> {
    pub fn new(sample: &'a Sample<f64>, bandwidth: f64) -> Kde<'a> {
        assert!(bandwidth > 0.0);

        Kde {
            sample,
            exponent_scale: (2.0 * bandwidth * bandwidth).recip(),
            normalizer: bandwidth * (2.0 * PI).sqrt(),
        }
    }

    /// Estimated probability density at `x`: the mean of the kernel applied
    /// to the distance from every sample value.
    pub fn estimate(&self, x: f64) -> f64 {
        let sum: f64 = self.sample.iter().map(|&v| self.kernel(x - v)).sum();

        sum / cast::f64(self.sample.len())
    }

    /// Evaluates the estimator at every point of `grid`.
    pub fn map(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&x| self.estimate(x)).collect()
    }

    fn kernel(&self, u: f64) -> f64 {
        (-self.exponent_scale * u * u).exp() / self.normalizer
    }
}
