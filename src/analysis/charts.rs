//! Chart selection: histograms and trends for numeric columns, value counts for categorical ones.
//!
//! Charts are declarative descriptors; rendering is left to the caller.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::Dataset;

use super::classify::ColumnClassification;
use super::stats::{numeric_values, to_fixed};
use super::{HISTOGRAM_BINS, MAX_CATEGORICAL_CHARTS, MAX_CATEGORY_VALUES, TREND_POINTS};

/// Chart types understood by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
}

/// Y value of a chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointValue {
    /// Frequencies and category counts.
    Count(u64),
    /// Raw measurements.
    Measure(f64),
}

impl PointValue {
    pub fn as_f64(self) -> f64 {
        match self {
            PointValue::Count(n) => n as f64,
            PointValue::Measure(v) => v,
        }
    }
}

/// One plot-ready row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: PointValue,
}

/// Which data field to plot and how to label it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub key: String,
    pub name: String,
}

impl Series {
    fn value(name: impl Into<String>) -> Self {
        Self {
            key: "value".to_string(),
            name: name.into(),
        }
    }
}

/// Declarative description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<Series>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
}

impl ChartDescriptor {
    fn new(kind: ChartKind, title: String, data: Vec<ChartPoint>, series: Option<Series>) -> Self {
        Self {
            kind,
            title,
            data,
            series: series.map(|s| vec![s]),
            x_label: None,
            y_label: None,
        }
    }
}

/// One histogram interval. `[min, max)`, except the last bin which also holds the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

/// Equal-width histogram over `[min(values), max(values)]`.
///
/// Every value lands in exactly one bin. When all values are equal the range has zero width and
/// every value goes to the first bin. Returns no bins for empty input or `bin_count == 0`.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            min: min + i as f64 * width,
            max: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = if width > 0.0 && width.is_finite() {
            (((v - min) / width).floor() as usize).min(bin_count - 1)
        } else {
            0
        };
        bins[idx].count += 1;
    }

    bins
}

/// Occurrences of each trimmed value of `column`, most frequent first, capped at `limit`.
///
/// Empty or missing values count as `"Unknown"`. Among equal counts, labels that are canonical
/// non-negative integers (`"0"`, `"7"`, `"10"`, but not `"07"`) come first in ascending numeric
/// order, then every other label in first-seen order.
pub fn category_counts(dataset: &Dataset, column: &str, limit: usize) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in &dataset.records {
        let label = record
            .get(column)
            .and_then(|v| v.as_label())
            .unwrap_or_else(|| "Unknown".to_string());
        match index.get(&label) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(label.clone(), order.len());
                order.push((label, 1));
            }
        }
    }

    order.sort_by_key(|(label, _)| integer_key(label).map_or((1, 0), |n| (0, n)));
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

fn integer_key(label: &str) -> Option<u32> {
    let canonical = label == "0" || (!label.starts_with('0') && label.bytes().all(|b| b.is_ascii_digit()));
    if !canonical {
        return None;
    }
    label.parse::<u32>().ok().filter(|&n| n < u32::MAX)
}

fn numeric_charts(column: &str, values: &[f64]) -> Vec<ChartDescriptor> {
    let mut charts = Vec::new();
    if values.is_empty() {
        return charts;
    }

    let bins = histogram(values, HISTOGRAM_BINS);
    charts.push(ChartDescriptor::new(
        ChartKind::Bar,
        format!("Distribution of {column}"),
        bins.iter()
            .map(|b| ChartPoint {
                name: format!("{}-{}", to_fixed(b.min, 1), to_fixed(b.max, 1)),
                value: PointValue::Count(b.count),
            })
            .collect(),
        Some(Series::value("Frequency")),
    ));

    if values.len() > 1 {
        charts.push(ChartDescriptor::new(
            ChartKind::Line,
            format!("Trend of {column}"),
            values
                .iter()
                .take(TREND_POINTS)
                .enumerate()
                .map(|(i, &v)| ChartPoint {
                    name: format!("Item {}", i + 1),
                    value: PointValue::Measure(v),
                })
                .collect(),
            Some(Series::value(column)),
        ));
    }

    charts
}

fn categorical_charts(column: &str, counts: &[(String, u64)]) -> Vec<ChartDescriptor> {
    if counts.is_empty() {
        return Vec::new();
    }

    let points: Vec<ChartPoint> = counts
        .iter()
        .map(|(name, n)| ChartPoint {
            name: name.clone(),
            value: PointValue::Count(*n),
        })
        .collect();

    vec![
        ChartDescriptor::new(
            ChartKind::Pie,
            format!("Distribution of {column}"),
            points.clone(),
            None,
        ),
        ChartDescriptor::new(
            ChartKind::Bar,
            format!("Count by {column}"),
            points,
            Some(Series::value("Count")),
        ),
    ]
}

/// Build the chart list for a classified dataset.
///
/// Per numeric column: a distribution bar chart and, with more than one value, a trend line.
/// Per each of the first three categorical columns: a pie chart and a count bar chart over the
/// ten most frequent values.
pub fn select_charts(dataset: &Dataset, classification: &ColumnClassification) -> Vec<ChartDescriptor> {
    let mut charts = Vec::new();

    for col in classification.numeric() {
        charts.extend(numeric_charts(col, &numeric_values(dataset, col)));
    }

    for col in classification.categorical().take(MAX_CATEGORICAL_CHARTS) {
        let counts = category_counts(dataset, col, MAX_CATEGORY_VALUES);
        charts.extend(categorical_charts(col, &counts));
    }

    charts
}
