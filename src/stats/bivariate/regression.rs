//! Ordinary least squares fitting.

use crate::stats::bivariate::Data;

/// A straight line fitted to paired observations by ordinary least squares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StraightLine {
    pub slope: f64,
    pub intercept: f64,
}

impl StraightLine {
    /// Fits the line to the observations.
    ///
    /// Returns `None` when the regression is undefined: fewer than two
    /// points, or zero variance in x.
    pub fn fit(data: &Data<'_, f64, f64>) -> Option<StraightLine> {
        if data.len() < 2 {
            return None;
        }

        let x_mean = data.x().mean();
        let y_mean = data.y().mean();

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in data.x().iter().zip(data.y().iter()) {
            let dx = x - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }

        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(StraightLine {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// The y value the fitted line predicts at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Pearson correlation coefficient of the observations.
///
/// `None` when either coordinate has zero variance.
pub fn pearson_correlation(data: &Data<'_, f64, f64>) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }

    let x_mean = data.x().mean();
    let y_mean = data.y().mean();

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in data.x().iter().zip(data.y().iter()) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some(sxy / (sxx * syy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::{pearson_correlation, StraightLine};
    use crate::stats::bivariate::Data;
    use approx::assert_relative_eq;

    #[test]
    fn collinear_points_fit_exactly() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];

        let line = StraightLine::fit(&Data::new(&xs, &ys)).unwrap();

        assert_relative_eq!(line.slope, 2.0);
        assert_relative_eq!(line.intercept, 0.0);
        assert_relative_eq!(line.predict(10.0), 20.0);
    }

    #[test]
    fn noisy_points_fit_the_closed_form() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.1, 1.9, 3.2, 3.8];

        let line = StraightLine::fit(&Data::new(&xs, &ys)).unwrap();

        // Closed-form solution computed by hand.
        assert_relative_eq!(line.slope, 0.94, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn single_point_is_undefined() {
        let xs = [5.0];
        let ys = [1.0];

        assert_eq!(StraightLine::fit(&Data::new(&xs, &ys)), None);
    }

    #[test]
    fn zero_x_variance_is_undefined() {
        let xs = [1.0, 1.0];
        let ys = [1.0, 2.0];

        assert_eq!(StraightLine::fit(&Data::new(&xs, &ys)), None);
        assert_eq!(pearson_correlation(&Data::new(&xs, &ys)), None);
    }

    #[test]
    fn correlation_of_a_perfect_line_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [3.0, 5.0, 7.0, 9.0];

        let r = pearson_correlation(&Data::new(&xs, &ys)).unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
    }
}
