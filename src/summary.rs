//! Reduction of all series into the summary bar chart data.

use crate::model::Series;

#[derive(Debug, PartialEq)]
pub struct SummaryEntry {
    pub name: String,
    pub estimate: f64,
}

pub struct Summary {
    /// One entry per series, in authoring order. Never re-sorted, so
    /// repeated report generation stays visually stable.
    pub entries: Vec<SummaryEntry>,
    /// Upper bound of the shared value axis: the largest estimate across
    /// all series.
    pub axis_max: f64,
}

pub fn summarize(series: &[Series]) -> Summary {
    let entries = series
        .iter()
        .map(|series| SummaryEntry {
            name: series.name.clone(),
            estimate: series.result.estimate,
        })
        .collect();

    let axis_max = series
        .iter()
        .map(|series| series.result.estimate)
        .fold(0.0, f64::max);

    Summary { entries, axis_max }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::model::BenchReport;

    fn report() -> BenchReport {
        crate::model::tests::sample_report()
    }

    #[test]
    fn entries_preserve_authoring_order() {
        let report = report();
        let summary = summarize(&report.series);

        let names: Vec<&str> = summary.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["fib", "ackermann"]);
    }

    #[test]
    fn axis_spans_zero_to_the_largest_estimate() {
        let report = report();
        let summary = summarize(&report.series);

        assert_eq!(summary.axis_max, 812.5);
    }
}
