mod distribution;
mod regression;
mod summary;

use crate::config;
use crate::plot::{Bars, Line, LineCurve, PlotContext, Plotter, Points, Size};
use plotters::prelude::*;

pub(crate) static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
pub(crate) const POINT_SIZE: u32 = 2;

impl From<Size> for (u32, u32) {
    fn from(other: Size) -> Self {
        let Size(width, height) = other;
        (width as u32, height as u32)
    }
}

impl Line {
    fn to_line_vec(&self) -> Vec<(f64, f64)> {
        vec![self.start, self.end]
    }
}
impl<'a> LineCurve<'a> {
    fn to_points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        (self.xs.iter().copied()).zip(self.ys.iter().copied())
    }
}
impl<'a> Points<'a> {
    fn to_points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        (self.xs.iter().copied()).zip(self.ys.iter().copied())
    }
}
impl<'a> Bars<'a> {
    /// `(left, right, height)` triple per bucket.
    fn to_rects(&self) -> impl Iterator<Item = (f64, f64, f64)> + 'a {
        let min = self.min;
        let width = self.width;
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = min + cast::f64(i) * width;
            (left, left + width, cast::f64(count))
        })
    }
}

pub(crate) struct Colors {
    pub summary_bar: RGBColor,
    pub scatter_point: RGBColor,
    pub regression_line: RGBColor,
    pub histogram_bar: RGBColor,
    pub kde_fill: RGBColor,
    pub kde_stroke: RGBColor,
}
impl From<&config::Colors> for Colors {
    fn from(colors: &config::Colors) -> Self {
        fn to_rgb(color: config::Color) -> RGBColor {
            RGBColor(color.r, color.g, color.b)
        }

        Colors {
            summary_bar: to_rgb(colors.summary_bar),
            scatter_point: to_rgb(colors.scatter_point),
            regression_line: to_rgb(colors.regression_line),
            histogram_bar: to_rgb(colors.histogram_bar),
            kde_fill: to_rgb(colors.kde_fill),
            kde_stroke: to_rgb(colors.kde_stroke),
        }
    }
}

pub struct PlottersBackend {
    colors: Colors,
}
impl PlottersBackend {
    pub fn new(colors: &config::Colors) -> PlottersBackend {
        PlottersBackend {
            colors: colors.into(),
        }
    }
}

impl Plotter for PlottersBackend {
    fn summary(
        &mut self,
        ctx: PlotContext<'_>,
        entries: &[(&str, f64)],
        axis_max: f64,
        value_label: &str,
    ) {
        summary::summary_chart(&self.colors, ctx, entries, axis_max, value_label);
    }

    fn scatter_regression(
        &mut self,
        ctx: PlotContext<'_>,
        x_label: &str,
        y_label: &str,
        x_max: f64,
        y_max: f64,
        points: Points<'_>,
        regression: Option<Line>,
    ) {
        regression::scatter_regression(
            &self.colors,
            ctx,
            x_label,
            y_label,
            x_max,
            y_max,
            points,
            regression,
        );
    }

    fn histogram(
        &mut self,
        ctx: PlotContext<'_>,
        value_label: &str,
        x_range: (f64, f64),
        y_max: f64,
        bars: Bars<'_>,
    ) {
        distribution::histogram(&self.colors, ctx, value_label, x_range, y_max, bars);
    }

    fn kde(
        &mut self,
        ctx: PlotContext<'_>,
        value_label: &str,
        x_range: (f64, f64),
        y_max: f64,
        curve: LineCurve<'_>,
    ) {
        distribution::kde(&self.colors, ctx, value_label, x_range, y_max, curve);
    }

    fn wait(&mut self) {}
}
