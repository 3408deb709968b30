//! Per-series distribution panel: the state machine that mediates between
//! control-widget events and the histogram/KDE engines.
//!
//! A panel owns everything that survives across redraws: its own copy of the
//! sample, the fixed evaluation grid, the current display mode and the
//! current resolution (bin width in histogram mode, bandwidth in KDE mode).
//! Axis domains are computed once at construction so the axes never rescale
//! mid-interaction; only the dynamic shapes are regenerated per event.

use crate::stats::univariate::{histogram, kde::Kde, Sample};

/// Number of x coordinates at which the density curve is evaluated. Fixed at
/// panel construction; bandwidth changes only recompute the y values.
const GRID_LEN: usize = 1000;

/// Divisor for the coarsest useful resolution: the whole value range split
/// into this many buckets.
const COARSE_DIVISOR: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Histogram,
    Kde,
}

/// Events delivered by the control widgets. Mode switches come from the
/// radio choice, resolution changes from the slider.
#[derive(Clone, Copy, Debug)]
pub enum ControlEvent {
    SwitchToHistogram,
    SwitchToKde,
    ResolutionChanged(f64),
}

/// What the rendering surface has to rebuild after an event, from nothing
/// (`Skip`) to the dynamic shapes plus the y axis and the resolution control
/// (`Full`). Ordered by increasing amount of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Redraw {
    Skip,
    Shapes,
    Full,
}

/// Drawable data for the current mode, regenerated wholesale per redraw.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelShapes {
    /// Equal-width bars: bucket `i` spans
    /// `[min + i * width, min + (i + 1) * width)`.
    Bars {
        min: f64,
        width: f64,
        counts: Vec<usize>,
    },
    /// One `(x, density)` point per evaluation grid entry.
    Curve(Vec<(f64, f64)>),
}

/// Classification of a series' distribution data.
pub enum DistributionPanel {
    /// The series carries no distribution sample; the report shows a fixed
    /// "no data" marker and no control widget.
    Missing,
    /// All sample values are identical; neither mode can render a meaningful
    /// distribution, so the report shows a marker and no control widget.
    Degenerate,
    Active(PanelSession),
}

impl DistributionPanel {
    pub fn build(values: Option<&[f64]>) -> DistributionPanel {
        match values {
            None => DistributionPanel::Missing,
            Some([]) => DistributionPanel::Missing,
            Some(values) => {
                let sample = Sample::new(values);
                if sample.max() == sample.min() {
                    DistributionPanel::Degenerate
                } else {
                    DistributionPanel::Active(PanelSession::new(values))
                }
            }
        }
    }
}

/// The mutable session behind one distribution panel.
pub struct PanelSession {
    values: Vec<f64>,
    data_min: f64,
    data_max: f64,
    grid: Vec<f64>,
    x_range: (f64, f64),
    mode: Mode,
    resolution: f64,
    min_resolution: f64,
    max_resolution: f64,
    hist_y_max: f64,
    kde_y_max: f64,
}

impl PanelSession {
    /// Builds the session for a non-degenerate sample: at least two distinct
    /// values.
    fn new(values: &[f64]) -> PanelSession {
        let sample = Sample::new(values);
        let (data_min, data_max) = (sample.min(), sample.max());
        let span = data_max - data_min;

        let min_resolution = span / cast::f64(values.len());
        let max_resolution = span / COARSE_DIVISOR;

        // Both modes share one x axis, padded by the coarsest resolution and
        // pinned at zero on the left.
        let x_min = (data_min - max_resolution).max(0.0);
        let x_max = data_max + max_resolution;
        let step = (x_max - x_min) / cast::f64(GRID_LEN);
        let grid: Vec<f64> = (0..GRID_LEN).map(|i| x_min + cast::f64(i) * step).collect();

        // The y domain of each mode is fixed up front: the histogram peaks
        // at the coarsest bin width, the density curve at the narrowest
        // bandwidth.
        let hist_y_max = histogram::counts(sample, max_resolution, data_min, data_max)
            .into_iter()
            .max()
            .map_or(0.0, cast::f64);
        let kde_y_max = Kde::new(sample, min_resolution)
            .map(&grid)
            .into_iter()
            .fold(0.0, f64::max);

        PanelSession {
            values: values.to_vec(),
            data_min,
            data_max,
            grid,
            x_range: (x_min, x_max),
            mode: Mode::Histogram,
            resolution: min_resolution,
            min_resolution,
            max_resolution,
            hist_y_max,
            kde_y_max,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The resolution currently driving the dynamic shapes. Reused verbatim
    /// across mode switches, without clamping to the other mode's bounds.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Bounds for the resolution control, from the finest meaningful bin to
    /// the coarsest useful view.
    pub fn resolution_bounds(&self) -> (f64, f64) {
        (self.min_resolution, self.max_resolution)
    }

    /// The shared x axis domain of both modes.
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Upper bound of the y axis for the current mode. Computed once at
    /// construction; never rescaled by resolution changes.
    pub fn y_max(&self) -> f64 {
        match self.mode {
            Mode::Histogram => self.hist_y_max,
            Mode::Kde => self.kde_y_max,
        }
    }

    /// Applies one control event, in arrival order, and reports what must be
    /// redrawn. A switch into the current mode and a resolution that is not
    /// strictly positive both leave the session untouched.
    pub fn apply(&mut self, event: ControlEvent) -> Redraw {
        match event {
            ControlEvent::SwitchToHistogram => self.switch_to(Mode::Histogram),
            ControlEvent::SwitchToKde => self.switch_to(Mode::Kde),
            ControlEvent::ResolutionChanged(value) => {
                if !(value > 0.0) {
                    return Redraw::Skip;
                }
                self.resolution = value;
                Redraw::Shapes
            }
        }
    }

    /// Applies a burst of events and folds their redraw requirements into
    /// the strongest one, so rapid slider drags cost a single render instead
    /// of queueing one per event.
    pub fn apply_batch<I>(&mut self, events: I) -> Redraw
    where
        I: IntoIterator<Item = ControlEvent>,
    {
        events
            .into_iter()
            .map(|event| self.apply(event))
            .max()
            .unwrap_or(Redraw::Skip)
    }

    fn switch_to(&mut self, mode: Mode) -> Redraw {
        if self.mode == mode {
            return Redraw::Skip;
        }
        self.mode = mode;
        Redraw::Full
    }

    /// Recomputes the drawable data for the current mode at the current
    /// resolution. The previous shapes are discarded wholesale.
    pub fn shapes(&self) -> PanelShapes {
        let sample = Sample::new(&self.values);
        match self.mode {
            Mode::Histogram => PanelShapes::Bars {
                min: self.data_min,
                width: self.resolution,
                counts: histogram::counts(sample, self.resolution, self.data_min, self.data_max),
            },
            Mode::Kde => {
                let density = Kde::new(sample, self.resolution).map(&self.grid);
                PanelShapes::Curve(self.grid.iter().copied().zip(density).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FIBONACCI: &[f64] = &[1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0];

    fn session(values: &[f64]) -> PanelSession {
        match DistributionPanel::build(Some(values)) {
            DistributionPanel::Active(session) => session,
            _ => panic!("expected an active panel"),
        }
    }

    #[test]
    fn defaults_are_data_driven() {
        let session = session(FIBONACCI);

        assert_eq!(session.mode(), Mode::Histogram);
        assert_relative_eq!(session.resolution(), 12.0 / 7.0);

        let (min_res, max_res) = session.resolution_bounds();
        assert_relative_eq!(min_res, 12.0 / 7.0);
        assert_relative_eq!(max_res, 12.0 / 20.0);
    }

    #[test]
    fn grid_is_fixed_at_construction() {
        let mut session = session(FIBONACCI);
        let (x_min, x_max) = session.x_range();

        assert_relative_eq!(x_min, 1.0 - 12.0 / 20.0);
        assert_relative_eq!(x_max, 13.0 + 12.0 / 20.0);

        session.apply(ControlEvent::SwitchToKde);
        session.apply(ControlEvent::ResolutionChanged(3.0));
        match session.shapes() {
            PanelShapes::Curve(points) => {
                assert_eq!(points.len(), 1000);
                assert_relative_eq!(points[0].0, x_min);
                assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
            }
            PanelShapes::Bars { .. } => panic!("expected a curve"),
        }
    }

    #[test]
    fn x_axis_is_pinned_at_zero_on_the_left() {
        // min - max_resolution would land below zero here.
        let session = session(&[0.001, 0.2, 0.4]);

        assert_eq!(session.x_range().0, 0.0);
    }

    #[test]
    fn mode_switch_is_idempotent() {
        let mut session = session(FIBONACCI);

        session.apply(ControlEvent::SwitchToKde);
        assert_eq!(session.apply(ControlEvent::SwitchToHistogram), Redraw::Full);
        let shapes = session.shapes();

        assert_eq!(session.apply(ControlEvent::SwitchToHistogram), Redraw::Skip);
        assert_eq!(session.mode(), Mode::Histogram);
        assert_eq!(session.shapes(), shapes);
    }

    #[test]
    fn non_positive_resolutions_are_ignored() {
        let mut session = session(FIBONACCI);
        let before = session.resolution();
        let shapes = session.shapes();

        assert_eq!(session.apply(ControlEvent::ResolutionChanged(0.0)), Redraw::Skip);
        assert_eq!(session.apply(ControlEvent::ResolutionChanged(-3.0)), Redraw::Skip);
        assert_eq!(
            session.apply(ControlEvent::ResolutionChanged(f64::NAN)),
            Redraw::Skip
        );

        assert_eq!(session.resolution(), before);
        assert_eq!(session.shapes(), shapes);
    }

    #[test]
    fn resolution_carries_over_unclamped() {
        let mut session = session(FIBONACCI);

        // Way outside the panel's own bounds on purpose.
        session.apply(ControlEvent::ResolutionChanged(999.0));
        assert_eq!(session.apply(ControlEvent::SwitchToKde), Redraw::Full);

        assert_eq!(session.resolution(), 999.0);
    }

    #[test]
    fn y_domains_never_rescale() {
        let mut session = session(FIBONACCI);
        let hist_y = session.y_max();

        session.apply(ControlEvent::ResolutionChanged(5.0));
        assert_eq!(session.y_max(), hist_y);

        session.apply(ControlEvent::SwitchToKde);
        let kde_y = session.y_max();
        session.apply(ControlEvent::ResolutionChanged(0.25));
        assert_eq!(session.y_max(), kde_y);

        session.apply(ControlEvent::SwitchToHistogram);
        assert_eq!(session.y_max(), hist_y);
    }

    #[test]
    fn batches_fold_to_the_strongest_redraw() {
        let mut session = session(FIBONACCI);

        let redraw = session.apply_batch(vec![
            ControlEvent::ResolutionChanged(5.0),
            ControlEvent::SwitchToKde,
            ControlEvent::ResolutionChanged(-1.0),
            ControlEvent::ResolutionChanged(7.0),
        ]);

        assert_eq!(redraw, Redraw::Full);
        assert_eq!(session.mode(), Mode::Kde);
        assert_eq!(session.resolution(), 7.0);

        assert_eq!(
            session.apply_batch(vec![
                ControlEvent::ResolutionChanged(0.0),
                ControlEvent::ResolutionChanged(-2.0),
            ]),
            Redraw::Skip
        );
        assert_eq!(session.apply_batch(std::iter::empty()), Redraw::Skip);
    }

    #[test]
    fn degenerate_and_missing_samples_are_classified() {
        assert!(matches!(
            DistributionPanel::build(None),
            DistributionPanel::Missing
        ));
        assert!(matches!(
            DistributionPanel::build(Some(&[])),
            DistributionPanel::Missing
        ));
        assert!(matches!(
            DistributionPanel::build(Some(&[4.0, 4.0, 4.0, 4.0])),
            DistributionPanel::Degenerate
        ));
        assert!(matches!(
            DistributionPanel::build(Some(&[4.0])),
            DistributionPanel::Degenerate
        ));
        assert!(matches!(
            DistributionPanel::build(Some(FIBONACCI)),
            DistributionPanel::Active(_)
        ));
    }

    #[test]
    fn session_owns_its_sample_copy() {
        let values = vec![1.0, 2.0, 3.0];
        let session = session(&values);
        drop(values);

        assert!(matches!(session.shapes(), PanelShapes::Bars { .. }));
    }
}
