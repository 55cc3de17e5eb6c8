//! Classification, statistics, charts and insights over an extracted [`Dataset`].
//!
//! Currently implemented:
//!
//! - [`classify`]: numeric vs categorical columns (70 % numeric-parse threshold)
//! - [`stats`]: dataset counters and per-column sum/mean/min/max
//! - [`charts`]: histograms, trends and category counts as chart descriptors
//! - [`insights`]: short narrative notes
//!
//! [`analyze_dataset`] sequences them and assembles an [`AnalysisResult`].
//!
//! ## Example
//!
//! ```rust
//! use data_insight::analysis::analyze_dataset;
//! use data_insight::types::{Dataset, Record};
//!
//! let ds = Dataset::new(vec![
//!     Record::from_iter([("city", "Oslo"), ("temp", "4.5")]),
//!     Record::from_iter([("city", "Rome"), ("temp", "18")]),
//! ]);
//!
//! let result = analyze_dataset(ds);
//! assert_eq!(result.statistics.count("total_rows"), Some(2));
//! assert_eq!(result.statistics.text("temp_max"), Some("18.00"));
//! assert_eq!(result.insights[0], "Analyzed 2 rows of data");
//! ```

pub mod charts;
pub mod classify;
pub mod insights;
pub mod stats;

use serde::Serialize;

use crate::types::{Dataset, Record};

pub use charts::{ChartDescriptor, ChartKind, ChartPoint, HistogramBin, PointValue, Series};
pub use classify::{ColumnClassification, ColumnKind, classify_columns};
pub use stats::{NumericSummary, StatValue, Statistics};

/// Characters kept in the `{content}` record when no structure is found.
pub const SNIPPET_CHARS: usize = 500;
/// A column is numeric when strictly more than this share of its values is numeric.
pub const NUMERIC_THRESHOLD_PERCENT: usize = 70;
/// Bins per numeric histogram.
pub const HISTOGRAM_BINS: usize = 10;
/// Categorical columns that get charts.
pub const MAX_CATEGORICAL_CHARTS: usize = 3;
/// Distinct values kept per categorical chart.
pub const MAX_CATEGORY_VALUES: usize = 10;
/// Points in a numeric trend chart.
pub const TREND_POINTS: usize = 50;
/// Rows shown in tabular previews.
pub const PREVIEW_ROWS: usize = 100;

/// The sole output of an analysis. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub charts: Vec<ChartDescriptor>,
    pub statistics: Statistics,
    pub raw_data: Dataset,
    pub insights: Vec<String>,
}

impl AnalysisResult {
    /// Returns `true` for the "no structured data" branch.
    pub fn is_empty(&self) -> bool {
        self.statistics.get("total_rows").is_none()
    }

    /// The first rows of `raw_data`, as shown in tabular views.
    pub fn preview(&self) -> &[Record] {
        let n = self.raw_data.records.len().min(PREVIEW_ROWS);
        &self.raw_data.records[..n]
    }

    /// Serialize to the caller-visible JSON contract.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Analyze an extracted dataset.
///
/// Records whose values are all empty are dropped first. If nothing remains the result carries
/// the "No structured data found" message, three canned insights and the unfiltered records.
pub fn analyze_dataset(dataset: Dataset) -> AnalysisResult {
    let filtered = dataset.meaningful();
    if filtered.is_empty() {
        tracing::debug!(records = dataset.row_count(), "no meaningful records");
        return AnalysisResult {
            charts: Vec::new(),
            statistics: stats::no_data_statistics(),
            raw_data: dataset,
            insights: insights::no_data_insights(),
        };
    }

    let classification = classify_columns(&filtered);
    let statistics = stats::compute_statistics(&filtered, &classification);
    let charts = charts::select_charts(&filtered, &classification);
    let insights = insights::generate_insights(
        filtered.row_count(),
        classification.numeric_count(),
        classification.categorical_count(),
    );

    tracing::debug!(
        rows = filtered.row_count(),
        numeric = classification.numeric_count(),
        categorical = classification.categorical_count(),
        charts = charts.len(),
        "analysis complete"
    );

    AnalysisResult {
        charts,
        statistics,
        raw_data: filtered,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::analyze_dataset;
    use crate::types::{Dataset, Record, Value};

    #[test]
    fn empty_dataset_passes_unfiltered_records_through() {
        let ds = Dataset::new(vec![Record::from_iter([("content", "")])]);
        let result = analyze_dataset(ds.clone());
        assert!(result.is_empty());
        assert!(result.charts.is_empty());
        assert_eq!(result.insights.len(), 3);
        assert_eq!(result.raw_data, ds);
    }

    #[test]
    fn total_rows_matches_filtered_raw_data() {
        let ds = Dataset::new(vec![
            Record::from_iter([("a", "1")]),
            Record::from_iter([("a", Value::Empty)]),
            Record::from_iter([("a", "2")]),
        ]);
        let result = analyze_dataset(ds);
        assert_eq!(result.statistics.count("total_rows"), Some(2));
        assert_eq!(result.raw_data.row_count(), 2);
    }

    #[test]
    fn preview_is_capped_at_one_hundred_rows() {
        let ds = Dataset::new((0..150).map(|i| Record::from_iter([("i", Value::Number(i as f64))])).collect());
        let result = analyze_dataset(ds);
        assert_eq!(result.preview().len(), 100);
        assert_eq!(result.insights.len(), 3);
    }

    #[test]
    fn result_serializes_raw_data_in_camel_case() {
        let ds = Dataset::new(vec![Record::from_iter([("a", "x")])]);
        let json: serde_json::Value = serde_json::from_str(&analyze_dataset(ds).to_json().unwrap()).unwrap();
        assert_eq!(json["rawData"][0]["a"], "x");
        assert!(json["charts"].is_array());
        assert_eq!(json["statistics"]["total_rows"], 1);
    }
}
