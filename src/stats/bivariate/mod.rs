//! Bivariate analysis

pub mod regression;

use crate::stats::univariate::Sample;
use crate::stats::Float;

/// An immutable view into a set of paired `(x, y)` observations.
#[derive(Clone, Copy)]
pub struct Data<'a, X, Y>(&'a [X], &'a [Y]);

impl<'a, X, Y> Data<'a, X, Y> {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a, X, Y> Data<'a, X, Y>
where
    X: Float,
    Y: Float,
{
    /// Creates a new data set from two slices of equal, non-zero length.
    pub fn new(xs: &'a [X], ys: &'a [Y]) -> Data<'a, X, Y> {
        assert!(!xs.is_empty() && xs.len() == ys.len());

        Data(xs, ys)
    }

    /// The x coordinates of the observations.
    pub fn x(&self) -> &'a Sample<X> {
        Sample::new(self.0)
    }

    /// The y coordinates of the observations.
    pub fn y(&self) -> &'a Sample<Y> {
        Sample::new(self.1)
    }
}
