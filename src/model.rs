//! The input data model: one benchmark results document, parsed and
//! validated up front. Everything in here is immutable after `load`.

use anyhow::{bail, Context, Result};
use linked_hash_set::LinkedHashSet;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One measured observation of a series.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Run configuration attached to a series. Opaque metadata: passed through
/// to the report verbatim, never interpreted numerically.
#[derive(Debug, Deserialize, Serialize)]
pub struct RunDescription {
    pub start: i64,
    pub sampling: f64,
    pub stabilize: bool,
    pub quota: f64,
    pub run: i64,
    pub instances: Vec<String>,
    pub samples: i64,
    pub time: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunResult {
    pub estimate: f64,
    #[serde(default)]
    pub r_square: Option<f64>,
}

/// One benchmark's full data bundle.
#[derive(Debug, Deserialize)]
pub struct Series {
    pub name: String,
    pub description: RunDescription,
    pub dataset: Vec<Point>,
    /// Raw distribution sample, when the benchmark recorded one.
    #[serde(default)]
    pub kde: Option<Vec<f64>>,
    pub result: RunResult,
}

#[derive(Debug, Deserialize)]
pub struct BenchReport {
    #[serde(rename = "xLabel")]
    pub x_label: String,
    #[serde(rename = "yLabel")]
    pub y_label: String,
    pub series: Vec<Series>,
}

/// Loads and validates a benchmark results document. Any defect in the
/// input is fatal here; downstream code assumes finite values, non-empty
/// datasets and unique series names.
pub fn load(path: &Path) -> Result<BenchReport> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input file {:?}", path))?;
    let report: BenchReport = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse benchmark results from {:?}", path))?;

    validate(&report)?;
    Ok(report)
}

fn validate(report: &BenchReport) -> Result<()> {
    if report.series.is_empty() {
        bail!("the report contains no series");
    }

    let mut names = LinkedHashSet::new();
    for series in &report.series {
        if !names.insert_if_absent(series.name.as_str()) {
            bail!(
                "duplicate series name {:?}; names must be unique within a report",
                series.name
            );
        }

        if series.dataset.is_empty() {
            bail!("series {:?} has an empty dataset", series.name);
        }
        if series
            .dataset
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            bail!("series {:?} contains a non-finite dataset point", series.name);
        }

        if let Some(kde) = &series.kde {
            if kde.iter().any(|v| !v.is_finite()) {
                bail!(
                    "series {:?} contains a non-finite distribution value",
                    series.name
                );
            }
        }

        if !series.result.estimate.is_finite() {
            bail!("series {:?} has a non-finite estimate", series.name);
        }
        if let Some(r_square) = series.result.r_square {
            if !r_square.is_finite() {
                bail!("series {:?} has a non-finite r_square", series.name);
            }
        }
    }

    Ok(())
}

/// Filesystem-safe output directory name for each series, unique within the
/// report even when distinct names collapse to the same safe form.
pub fn directory_names(report: &BenchReport) -> Vec<String> {
    let mut taken = HashSet::new();

    report
        .series
        .iter()
        .map(|series| {
            let base = make_filename_safe(&series.name);
            let mut name = base.clone();
            let mut counter = 1;
            while !taken.insert(name.clone()) {
                counter += 1;
                name = format!("{}_{}", base, counter);
            }
            name
        })
        .collect()
}

fn make_filename_safe(string: &str) -> String {
    string.replace(
        &['?', '"', '/', '\\', '*', '<', '>', ':', '|', '^', ' '][..],
        "_",
    )
}
