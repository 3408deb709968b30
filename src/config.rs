use anyhow::{Context, Result};
use std::borrow::ToOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[rustfmt::skip]
const DARK_BLUE: Color = Color { r: 31, g: 120, b: 180 };
#[rustfmt::skip]
const DARK_RED: Color = Color { r: 227, g: 26, b: 28 };
#[rustfmt::skip]
const TEAL: Color = Color { r: 78, g: 205, b: 196 };
#[rustfmt::skip]
const SLATE: Color = Color { r: 41, g: 47, b: 54 };

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Colors {
    /// The color of the summary chart bars. Defaults to DARK_BLUE
    pub summary_bar: Color,
    /// The color of the scatter panel dots. Defaults to DARK_BLUE
    pub scatter_point: Color,
    /// The color of the fitted regression lines. Defaults to DARK_RED
    pub regression_line: Color,
    /// The color of the distribution histogram bars. Defaults to DARK_BLUE
    pub histogram_bar: Color,
    /// The fill color of the density curve. Defaults to TEAL
    pub kde_fill: Color,
    /// The stroke color of the density curve. Defaults to SLATE
    pub kde_stroke: Color,
}
impl Default for Colors {
    fn default() -> Self {
        Self {
            summary_bar: DARK_BLUE,
            scatter_point: DARK_BLUE,
            regression_line: DARK_RED,
            histogram_bar: DARK_BLUE,
            kde_fill: TEAL,
            kde_stroke: SLATE,
        }
    }
}

/// Page geometry shared by every chart. Travels into the report builder as
/// an explicit value rather than as module-level constants.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one panel SVG, in logical pixels.
    pub panel_width: usize,
    /// Height of one panel SVG, in logical pixels.
    pub panel_height: usize,
    /// Width of the summary chart, spanning both page columns.
    pub summary_width: usize,
}
impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panel_width: 500,
            panel_height: 400,
            summary_width: 900,
        }
    }
}
impl LayoutConfig {
    /// The summary chart grows with the series count but never beyond a
    /// panel's height.
    pub fn summary_height(&self, n_series: usize) -> usize {
        (60 * n_series + 100).min(self.panel_height)
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
/// Struct to hold the various configuration settings that we can read from
/// the TOML config file.
struct TomlConfig {
    /// Path to output directory
    output_dir: Option<PathBuf>,

    /// The colors used for the charts. Users may wish to override this to
    /// accommodate colorblindness, or just to make things look prettier.
    colors: Colors,

    /// Chart geometry.
    layout: LayoutConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnPolicy {
    /// Two columns when at least one series carries a distribution sample,
    /// one column otherwise.
    Auto,
    /// Regression panels only, no distribution column.
    Single,
    /// Always reserve the distribution column.
    Two,
}
impl ColumnPolicy {
    fn from_str(s: &str) -> ColumnPolicy {
        match s {
            "auto" => ColumnPolicy::Auto,
            "single" => ColumnPolicy::Single,
            "two" => ColumnPolicy::Two,
            other => panic!("Unknown column policy: {}", other),
        }
    }
}

/// Struct to hold the configuration for one bench-report run.
#[derive(Debug)]
pub struct SelfConfig {
    /// The benchmark results JSON document to render.
    pub input: PathBuf,
    /// The directory the report is written to.
    pub output_dir: PathBuf,
    /// Page column policy.
    pub columns: ColumnPolicy,
    /// One shared scatter axis domain across all series instead of
    /// per-series domains.
    pub shared_axes: bool,
    /// Resolution override for every distribution panel: bin width in
    /// histogram mode, bandwidth in KDE mode. Non-positive values are
    /// ignored, like any other out-of-domain slider input.
    pub resolution: Option<f64>,
    /// The colors to use for charts.
    pub colors: Colors,
    /// Chart geometry.
    pub layout: LayoutConfig,
    /// How chatty the diagnostics on stderr should be.
    pub verbosity: u64,
}

/// Parse the command-line arguments, load the report.toml config file, and
/// generate a configuration object used for the rest of the run.
pub fn configure() -> Result<SelfConfig> {
    use clap::{App, AppSettings, Arg};

    let matches = App::new("bench-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render benchmark measurement results as an HTML report")
        .settings(&[
            AppSettings::UnifiedHelpMessage,
            AppSettings::DeriveDisplayOrder,
        ])
        .arg(
            Arg::with_name("INPUT")
                .required(true)
                .help("Path to the benchmark results JSON document"),
        )
        .arg(
            Arg::with_name("output-dir")
                .long("--output-dir")
                .short("o")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory the report is written to [default: bench-report]"),
        )
        .arg(
            Arg::with_name("columns")
                .long("--columns")
                .takes_value(true)
                .possible_values(&["auto", "single", "two"])
                .help("Page column policy. Possible values are auto, single, two.")
                .long_help(
"Page column policy. Possible values are [auto, single, two].

auto: two columns when at least one series carries a distribution sample, one
column otherwise. The default.

single: regression panels only; distribution samples are not rendered.

two: always reserve the distribution column.
"),
        )
        .arg(
            Arg::with_name("shared-axes")
                .long("--shared-axes")
                .help("Use one scatter axis domain across all series, for visual comparability"),
        )
        .arg(
            Arg::with_name("resolution")
                .long("--resolution")
                .takes_value(true)
                .value_name("VALUE")
                .help("Override the data-driven resolution of the distribution panels (bin width and bandwidth)"),
        )
        .arg(
            Arg::with_name("config")
                .long("--config")
                .takes_value(true)
                .value_name("PATH")
                .help("Path to the report.toml config file"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("--verbose")
                .short("v")
                .multiple(true)
                .help("Use verbose output (-vv for debug output)"),
        )
        .get_matches();

    // Load the config file.
    let toml_path: PathBuf = matches
        .value_of_os("config")
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "report.toml".into())
        .into();

    let toml_config = load_toml_file(&toml_path)?;

    let input = PathBuf::from(matches.value_of_os("INPUT").expect("INPUT is required"));

    let resolution = match matches.value_of("resolution") {
        Some(value) => Some(
            value
                .parse::<f64>()
                .with_context(|| format!("Invalid --resolution value {:?}", value))?,
        ),
        None => None,
    };

    // Set the output directory to (in descending order of preference):
    // - The --output-dir argument
    // - The value from the config file
    // - ./bench-report
    let output_dir = matches
        .value_of_os("output-dir")
        .map(PathBuf::from)
        .or(toml_config.output_dir)
        .unwrap_or_else(|| PathBuf::from("bench-report"));

    Ok(SelfConfig {
        input,
        output_dir,
        columns: (matches.value_of("columns"))
            .map(ColumnPolicy::from_str)
            .unwrap_or(ColumnPolicy::Auto),
        shared_axes: matches.is_present("shared-axes"),
        resolution,
        colors: toml_config.colors,
        layout: toml_config.layout,
        verbosity: matches.occurrences_of("verbose"),
    })
}

/// Load & parse the report.toml file (if present).
fn load_toml_file(toml_path: &Path) -> Result<TomlConfig> {
    if !toml_path.exists() {
        return Ok(TomlConfig::default());
    };

    let mut file = File::open(toml_path)
        .with_context(|| format!("Failed to open config file {:?}", toml_path))?;

    let mut str_buf = String::new();
    file.read_to_string(&mut str_buf)
        .with_context(|| format!("Failed to read config file {:?}", toml_path))?;

    let config: TomlConfig = toml::from_str(&str_buf)
        .with_context(|| format!("Failed to parse config file {:?}", toml_path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_height_scales_with_series_count_up_to_a_panel() {
        let layout = LayoutConfig::default();

        assert_eq!(layout.summary_height(1), 160);
        assert_eq!(layout.summary_height(2), 220);
        assert_eq!(layout.summary_height(10), 400);
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            output_dir = "out"

            [colors]
            kde_fill = { r = 1, g = 2, b = 3 }

            [layout]
            panel_width = 640
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.colors.kde_fill.r, 1);
        assert_eq!(config.colors.summary_bar.r, DARK_BLUE.r);
        assert_eq!(config.layout.panel_width, 640);
        assert_eq!(config.layout.panel_height, 400);
    }
}
