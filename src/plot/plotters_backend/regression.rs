use crate::plot::plotters_backend::{Colors, DEFAULT_FONT, POINT_SIZE};
use crate::plot::{Line, PlotContext, Points};
use plotters::data::float::pretty_print_float;
use plotters::prelude::*;

pub fn scatter_regression(
    colors: &Colors,
    ctx: PlotContext<'_>,
    x_label: &str,
    y_label: &str,
    x_max: f64,
    y_max: f64,
    points: Points<'_>,
    regression: Option<Line>,
) {
    let root_area = SVGBackend::new(&ctx.path, ctx.size.into()).into_drawing_area();

    let mut chart = ChartBuilder::on(&root_area)
        .margin((5).percent())
        .caption(format!("# {}", ctx.title), (DEFAULT_FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .unwrap();

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_formatter(&|&v| pretty_print_float(v, true))
        .y_label_formatter(&|&v| pretty_print_float(v, true))
        .draw()
        .unwrap();

    chart
        .draw_series(
            (points.to_points())
                .map(|(x, y)| Circle::new((x, y), POINT_SIZE, colors.scatter_point.filled())),
        )
        .unwrap()
        .label("Sample")
        .legend(|(x, y)| Circle::new((x + 10, y), POINT_SIZE, colors.scatter_point.filled()));

    if let Some(line) = regression {
        chart
            .draw_series(std::iter::once(PathElement::new(
                line.to_line_vec(),
                colors.regression_line.filled().stroke_width(2),
            )))
            .unwrap()
            .label("Linear regression")
            .legend(|(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    colors.regression_line.filled().stroke_width(2),
                )
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .unwrap();
}
