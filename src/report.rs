//! Report builder: walks every series once, invoking the engines and the
//! rendering surface, then assembles the HTML page.

use crate::config::{ColumnPolicy, SelfConfig};
use crate::format;
use crate::html::{self, Html, IndexContext, SeriesContext, StatRow};
use crate::model::{self, BenchReport, Series};
use crate::panel::{ControlEvent, DistributionPanel, Mode, PanelSession, PanelShapes};
use crate::plot::{Bars, Line, LineCurve, PlotContext, Plotter, PlottersBackend, Points, Size};
use crate::stats::bivariate::regression::{pearson_correlation, StraightLine};
use crate::stats::bivariate::Data;
use anyhow::Result;
use std::path::Path;

pub struct ReportBuilder<'a> {
    report: &'a BenchReport,
    config: &'a SelfConfig,
    plotter: Box<dyn Plotter>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(report: &'a BenchReport, config: &'a SelfConfig) -> ReportBuilder<'a> {
        ReportBuilder {
            report,
            config,
            plotter: Box::new(PlottersBackend::new(&config.colors)),
        }
    }

    pub fn generate(&mut self) -> Result<()> {
        let report = self.report;
        let config = self.config;

        html::mkdirp(&config.output_dir)?;

        let two_columns = match config.columns {
            ColumnPolicy::Auto => report.series.iter().any(|series| series.kde.is_some()),
            ColumnPolicy::Single => false,
            ColumnPolicy::Two => true,
        };

        self.generate_summary();

        // One shared scatter domain across all series, or one per series.
        let shared_domain = if config.shared_axes {
            Some(scatter_domain(&report.series))
        } else {
            None
        };

        let directories = model::directory_names(report);
        let mut series_contexts = Vec::with_capacity(report.series.len());
        for (series, directory) in report.series.iter().zip(&directories) {
            if let Some(context) =
                self.generate_series(series, directory, two_columns, shared_domain)
            {
                series_contexts.push(context);
            }
        }

        let context = IndexContext {
            common_css: html::COMMON_CSS,
            title: "Benchmarks report".to_owned(),
            summary_svg: "summary.svg".to_owned(),
            two_columns,
            series: series_contexts,
            generated: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        Html::new().render_index(&context, &config.output_dir.join("index.html"))?;

        self.plotter.wait();
        Ok(())
    }

    fn generate_summary(&mut self) {
        let report = self.report;
        let config = self.config;

        let summary = crate::summary::summarize(&report.series);
        let entries: Vec<(&str, f64)> = summary
            .entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.estimate))
            .collect();

        let ctx = PlotContext {
            title: "Benchmarks summary",
            path: config.output_dir.join("summary.svg"),
            size: Size(
                config.layout.summary_width,
                config.layout.summary_height(entries.len()),
            ),
        };

        let axis_max = positive_or_unit(summary.axis_max);
        elapsed!(
            "Generating the summary chart",
            self.plotter.summary(ctx, &entries, axis_max, &report.y_label)
        );
    }

    /// Renders one series: the scatter/regression panel, the stats table
    /// data and, in two-column layouts, the distribution panel driven
    /// through both of its modes. Returns `None` when an artifact could not
    /// be written; the page then omits the series.
    fn generate_series(
        &mut self,
        series: &Series,
        directory: &str,
        two_columns: bool,
        shared_domain: Option<(f64, f64)>,
    ) -> Option<SeriesContext> {
        let report = self.report;
        let config = self.config;

        let series_dir = config.output_dir.join(directory);
        try_else_return!(html::mkdirp(&series_dir), || None);

        let panel_size = Size(config.layout.panel_width, config.layout.panel_height);

        let xs: Vec<f64> = series.dataset.iter().map(|point| point.x).collect();
        let ys: Vec<f64> = series.dataset.iter().map(|point| point.y).collect();
        let data = Data::new(&xs, &ys);
        let line = StraightLine::fit(&data);

        let (x_max, y_max) =
            shared_domain.unwrap_or_else(|| scatter_domain(std::slice::from_ref(series)));
        let regression = line.map(|line| Line {
            start: (0.0, line.predict(0.0)),
            end: (x_max, line.predict(x_max)),
        });

        self.plotter.scatter_regression(
            PlotContext {
                title: &series.name,
                path: series_dir.join("scatter.svg"),
                size: panel_size,
            },
            &report.x_label,
            &report.y_label,
            x_max,
            y_max,
            Points { xs: &xs, ys: &ys },
            regression,
        );

        let mut histogram_svg = None;
        let mut kde_svg = None;
        let mut control = None;
        let mut marker = None;

        if two_columns {
            match DistributionPanel::build(series.kde.as_deref()) {
                DistributionPanel::Missing => {
                    marker = Some("No distribution data.".to_owned());
                }
                DistributionPanel::Degenerate => {
                    marker = Some("All data have same value.".to_owned());
                }
                DistributionPanel::Active(mut session) => {
                    // A non-positive override is ignored per the slider
                    // contract, keeping the data-driven default.
                    session.apply_batch(config.resolution.map(ControlEvent::ResolutionChanged));

                    // The builder stands in for the control widget here: it
                    // delivers one choice event per view and renders the
                    // resulting state. The stored resolution carries over to
                    // the second mode verbatim.
                    for &event in &[ControlEvent::SwitchToHistogram, ControlEvent::SwitchToKde] {
                        session.apply(event);
                        self.render_panel_view(&series_dir, series, &session, panel_size);
                    }

                    let (finest, coarsest) = session.resolution_bounds();
                    control = Some(format!(
                        "Resolution {} (slider from {} to {})",
                        format::short(session.resolution()),
                        format::short(finest),
                        format::short(coarsest),
                    ));
                    histogram_svg = Some(format!("{}/histogram.svg", directory));
                    kde_svg = Some(format!("{}/kde.svg", directory));
                }
            }
        }

        let description = try_else_return!(serde_json::to_string(&series.description), || None);

        Some(SeriesContext {
            name: series.name.clone(),
            scatter_svg: format!("{}/scatter.svg", directory),
            no_regression: line.is_none(),
            stats: stat_rows(series, &data, line),
            description,
            histogram_svg,
            kde_svg,
            control,
            marker,
        })
    }

    /// Renders the panel's current mode, reading everything from the
    /// session: the mode picks the file, the session provides the axis
    /// domains and the shapes.
    fn render_panel_view(
        &mut self,
        series_dir: &Path,
        series: &Series,
        session: &PanelSession,
        size: Size,
    ) {
        let filename = match session.mode() {
            Mode::Histogram => "histogram.svg",
            Mode::Kde => "kde.svg",
        };
        let ctx = PlotContext {
            title: &series.name,
            path: series_dir.join(filename),
            size,
        };
        let value_label = &self.report.y_label;

        match session.shapes() {
            PanelShapes::Bars { min, width, counts } => self.plotter.histogram(
                ctx,
                value_label,
                session.x_range(),
                session.y_max(),
                Bars {
                    min,
                    width,
                    counts: &counts,
                },
            ),
            PanelShapes::Curve(points) => {
                let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
                self.plotter.kde(
                    ctx,
                    value_label,
                    session.x_range(),
                    session.y_max(),
                    LineCurve { xs: &xs, ys: &ys },
                )
            }
        }
    }
}

/// Scatter axis domains: pinned at zero on the left, spanning the largest
/// observation on the right.
fn scatter_domain(series: &[Series]) -> (f64, f64) {
    let mut x_max = 0.0f64;
    let mut y_max = 0.0f64;
    for series in series {
        for point in &series.dataset {
            x_max = x_max.max(point.x);
            y_max = y_max.max(point.y);
        }
    }
    (positive_or_unit(x_max), positive_or_unit(y_max))
}

/// Keeps degenerate axis domains renderable.
fn positive_or_unit(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

fn stat_rows(series: &Series, data: &Data<'_, f64, f64>, line: Option<StraightLine>) -> Vec<StatRow> {
    fn row(label: &str, value: String) -> StatRow {
        StatRow {
            label: label.to_owned(),
            value,
        }
    }

    let mut rows = Vec::new();
    if let Some(line) = line {
        rows.push(row("Mean of x", format!("{:.0}", data.x().mean())));
        rows.push(row("Mean of y", format!("{:.2}", data.y().mean())));
        rows.push(row("Sample variance of x", format!("{:.0}", data.x().var(None))));
        rows.push(row("Sample variance of y", format!("{:.1}", data.y().var(None))));
        if let Some(r) = pearson_correlation(data) {
            rows.push(row("Correlation between x and y", format!("{:.3}", r)));
        }
        rows.push(row(
            "Linear regression line",
            format!("y = {:.2} + {:.3}x", line.intercept, line.slope),
        ));
    }
    rows.push(row("Coefficient", format::short(series.result.estimate)));
    if let Some(r_square) = series.result.r_square {
        rows.push(row("R²", format!("{:.4}", r_square)));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::ReportBuilder;
    use crate::config::{ColumnPolicy, Colors, LayoutConfig, SelfConfig};
    use crate::model::tests::sample_report;
    use std::fs;
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    fn test_config(output_dir: PathBuf) -> SelfConfig {
        SelfConfig {
            input: PathBuf::from("unused.json"),
            output_dir,
            columns: ColumnPolicy::Auto,
            shared_axes: false,
            resolution: None,
            colors: Colors::default(),
            layout: LayoutConfig::default(),
            verbosity: 0,
        }
    }

    fn svg_count(root: &Path) -> usize {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "svg"))
            .count()
    }

    #[test]
    fn end_to_end_two_series_report() {
        let report = sample_report();
        let tempdir = tempfile::tempdir().unwrap();
        let config = test_config(tempdir.path().join("report"));

        ReportBuilder::new(&report, &config).generate().unwrap();

        let out = &config.output_dir;
        assert!(out.join("index.html").is_file());
        assert!(out.join("summary.svg").is_file());
        assert!(out.join("fib/scatter.svg").is_file());
        assert!(out.join("fib/histogram.svg").is_file());
        assert!(out.join("fib/kde.svg").is_file());
        assert!(out.join("ackermann/scatter.svg").is_file());
        assert!(!out.join("ackermann/histogram.svg").exists());
        assert_eq!(svg_count(out), 5);

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("fib/histogram.svg"));
        assert!(html.contains("No distribution data."));
        assert!(!html.contains("No regression available"));
        assert!(html.contains("Linear regression line"));
    }

    #[test]
    fn degenerate_sample_renders_a_marker_and_no_panel() {
        let mut report = sample_report();
        report.series[0].kde = Some(vec![4.0, 4.0, 4.0, 4.0]);

        let tempdir = tempfile::tempdir().unwrap();
        let config = test_config(tempdir.path().join("report"));
        ReportBuilder::new(&report, &config).generate().unwrap();

        let out = &config.output_dir;
        assert!(!out.join("fib/histogram.svg").exists());
        assert!(!out.join("fib/kde.svg").exists());

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("All data have same value."));
        // No resolution control is instantiated for a degenerate panel.
        assert!(!html.contains("slider from"));
    }

    #[test]
    fn single_column_policy_skips_distribution_panels() {
        let report = sample_report();
        let tempdir = tempfile::tempdir().unwrap();
        let mut config = test_config(tempdir.path().join("report"));
        config.columns = ColumnPolicy::Single;

        ReportBuilder::new(&report, &config).generate().unwrap();

        let out = &config.output_dir;
        assert!(!out.join("fib/histogram.svg").exists());
        assert_eq!(svg_count(out), 3);

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(!html.contains("histogram.svg"));
        assert!(!html.contains("No distribution data."));
    }

    #[test]
    fn zero_x_variance_shows_the_no_regression_marker() {
        let mut report = sample_report();
        for point in &mut report.series[1].dataset {
            point.x = 1.0;
        }

        let tempdir = tempfile::tempdir().unwrap();
        let config = test_config(tempdir.path().join("report"));
        ReportBuilder::new(&report, &config).generate().unwrap();

        let html = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(html.contains("No regression available"));
    }

    #[test]
    fn resolution_override_is_routed_through_the_panel() {
        let report = sample_report();

        let tempdir = tempfile::tempdir().unwrap();
        let mut config = test_config(tempdir.path().join("override"));
        config.resolution = Some(6.0);
        ReportBuilder::new(&report, &config).generate().unwrap();
        let coarse = fs::read_to_string(config.output_dir.join("fib/histogram.svg")).unwrap();
        let html = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(html.contains("Resolution 6.0000"));

        let mut config = test_config(tempdir.path().join("default"));
        config.resolution = Some(-1.0);
        ReportBuilder::new(&report, &config).generate().unwrap();
        let default = fs::read_to_string(config.output_dir.join("fib/histogram.svg")).unwrap();

        // 6.0 buckets the sample differently than the ignored override's
        // data-driven default of 12/7.
        assert_ne!(coarse, default);
    }

    #[test]
    fn shared_axes_reuse_one_domain() {
        let report = sample_report();
        let tempdir = tempfile::tempdir().unwrap();
        let mut config = test_config(tempdir.path().join("report"));
        config.shared_axes = true;

        ReportBuilder::new(&report, &config).generate().unwrap();

        assert!(config.output_dir.join("index.html").is_file());
        assert_eq!(svg_count(&config.output_dir), 5);
    }
}
