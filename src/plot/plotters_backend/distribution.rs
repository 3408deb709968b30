use crate::plot::plotters_backend::{Colors, DEFAULT_FONT};
use crate::plot::{Bars, LineCurve, PlotContext};
use plotters::data::float::pretty_print_float;
use plotters::prelude::*;

pub fn histogram(
    colors: &Colors,
    ctx: PlotContext<'_>,
    value_label: &str,
    x_range: (f64, f64),
    y_max: f64,
    bars: Bars<'_>,
) {
    let root_area = SVGBackend::new(&ctx.path, ctx.size.into()).into_drawing_area();

    let mut chart = ChartBuilder::on(&root_area)
        .margin((5).percent())
        .caption(format!("{}: Histogram", ctx.title), (DEFAULT_FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(x_range.0..x_range.1, 0.0..y_max)
        .unwrap();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(value_label)
        .y_desc("Count")
        .x_label_formatter(&|&v| pretty_print_float(v, true))
        .y_label_formatter(&|&v| pretty_print_float(v, true))
        .draw()
        .unwrap();

    chart
        .draw_series(bars.to_rects().map(|(left, right, height)| {
            Rectangle::new([(left, 0.0), (right, height)], colors.histogram_bar.filled())
        }))
        .unwrap();
}

pub fn kde(
    colors: &Colors,
    ctx: PlotContext<'_>,
    value_label: &str,
    x_range: (f64, f64),
    y_max: f64,
    curve: LineCurve<'_>,
) {
    let root_area = SVGBackend::new(&ctx.path, ctx.size.into()).into_drawing_area();

    let mut chart = ChartBuilder::on(&root_area)
        .margin((5).percent())
        .caption(format!("{}: KDE", ctx.title), (DEFAULT_FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(x_range.0..x_range.1, 0.0..y_max)
        .unwrap();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(value_label)
        .y_desc("Density (a.u.)")
        .x_label_formatter(&|&v| pretty_print_float(v, true))
        .y_label_formatter(&|&v| pretty_print_float(v, true))
        .draw()
        .unwrap();

    chart
        .draw_series(
            AreaSeries::new(curve.to_points(), 0.0, colors.kde_fill.mix(0.8).filled())
                .border_style(&colors.kde_stroke),
        )
        .unwrap();
}
