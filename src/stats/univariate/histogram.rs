//! Equal-width histogram binning.

use crate::stats::univariate::Sample;

/// Computes raw bucket counts for `sample` over equal-width buckets.
///
/// Bucket `i` spans `[min + i * width, min + (i + 1) * width)` and a value
/// `v` increments bucket `floor((v - min) / width)`; `max` is used only to
/// size the bucket array. Callers must guarantee `min <= min(sample)` and
/// `max >= max(sample)`.
pub fn counts(sample: &Sample<f64>, width: f64, min: f64, max: f64) -> Vec<usize> {
    assert!(width > 0.0);
    assert!(min <= sample.min() && max >= sample.max());

    let n_buckets = ((max - min) / width) as usize + 1;
    let mut counts = vec![0; n_buckets];

    for &v in sample.iter() {
        counts[((v - min) / width) as usize] += 1;
    }

    counts
}
