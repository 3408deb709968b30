use crate::plot::plotters_backend::{Colors, DEFAULT_FONT};
use crate::plot::PlotContext;
use plotters::data::float::pretty_print_float;
use plotters::prelude::*;

pub fn summary_chart(
    colors: &Colors,
    ctx: PlotContext<'_>,
    entries: &[(&str, f64)],
    axis_max: f64,
    value_label: &str,
) {
    let root_area = SVGBackend::new(&ctx.path, ctx.size.into()).into_drawing_area();
    let n = entries.len();

    // One horizontal band per series, first series at the top.
    let row = |i: usize| cast::f64(n - 1 - i);

    let mut chart = ChartBuilder::on(&root_area)
        .margin((5).percent())
        .caption(ctx.title, (DEFAULT_FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, 150)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..axis_max, -0.5..cast::f64(n) - 0.5)
        .unwrap();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(format!("Estimated {}", value_label))
        .x_label_formatter(&|&v| pretty_print_float(v, true))
        .y_label_style((DEFAULT_FONT, 12))
        .y_label_formatter(&|v: &f64| {
            let band = v.round();
            if band < 0.0 || band >= cast::f64(n) {
                return String::new();
            }
            entries[n - 1 - band as usize].0.to_string()
        })
        .y_labels(n)
        .draw()
        .unwrap();

    chart
        .draw_series(entries.iter().enumerate().map(|(i, &(_, estimate))| {
            Rectangle::new(
                [(0.0, row(i) - 0.4), (estimate, row(i) + 0.4)],
                colors.summary_bar.filled(),
            )
        }))
        .unwrap();
}
