mod plotters_backend;

pub(crate) use self::plotters_backend::PlottersBackend;

use std::path::PathBuf;

/// Width and height of a chart, in logical pixels.
#[derive(Clone, Copy)]
pub struct Size(pub usize, pub usize);

#[derive(Clone, Copy)]
pub(crate) struct Points<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
}

#[derive(Clone, Copy)]
pub(crate) struct LineCurve<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
}

#[derive(Clone, Copy)]
pub(crate) struct Line {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// Equal-width histogram bars: bar `i` spans
/// `[min + i * width, min + (i + 1) * width)`.
#[derive(Clone, Copy)]
pub(crate) struct Bars<'a> {
    pub min: f64,
    pub width: f64,
    pub counts: &'a [usize],
}

pub(crate) struct PlotContext<'a> {
    pub title: &'a str,
    pub path: PathBuf,
    pub size: Size,
}

/// The 2-D rendering surface. The report builder computes values and
/// coordinates; implementations own scales, shape placement and file output.
pub(crate) trait Plotter {
    fn summary(
        &mut self,
        ctx: PlotContext<'_>,
        entries: &[(&str, f64)],
        axis_max: f64,
        value_label: &str,
    );

    fn scatter_regression(
        &mut self,
        ctx: PlotContext<'_>,
        x_label: &str,
        y_label: &str,
        x_max: f64,
        y_max: f64,
        points: Points<'_>,
        regression: Option<Line>,
    );

    fn histogram(
        &mut self,
        ctx: PlotContext<'_>,
        value_label: &str,
        x_range: (f64, f64),
        y_max: f64,
        bars: Bars<'_>,
    );

    fn kde(
        &mut self,
        ctx: PlotContext<'_>,
        value_label: &str,
        x_range: (f64, f64),
        y_max: f64,
        curve: LineCurve<'_>,
    );

    /// Blocks until every chart issued so far is on disk. Synchronous
    /// backends have nothing to do here.
    fn wait(&mut self);
}
