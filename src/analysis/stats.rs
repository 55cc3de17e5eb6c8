//! Dataset-wide counters and per-column numeric summaries.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{Dataset, Value};

use super::classify::ColumnClassification;

/// A single statistics value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum StatValue {
    /// Row/column counters.
    Count(u64),
    /// Two-decimal formatted numbers and messages.
    Text(String),
    /// Boolean markers such as `file_processed`.
    Flag(bool),
}

/// Ordered statistics map, serialized as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    entries: Vec<(String, StatValue)>,
}

impl Statistics {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: StatValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Counter value for `key`, if it is a [`StatValue::Count`].
    pub fn count(&self, key: &str) -> Option<u64> {
        match self.get(key) {
            Some(StatValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    /// Text value for `key`, if it is a [`StatValue::Text`].
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(StatValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Sum, mean and extrema of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    /// Number of valid values.
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize `values`. Returns `None` when there are no values.
pub fn summarize(values: &[f64]) -> Option<NumericSummary> {
    let (&first, rest) = values.split_first()?;
    let (sum, min, max) = rest
        .iter()
        .fold((first, first, first), |(sum, min, max), &v| (sum + v, min.min(v), max.max(v)));
    Some(NumericSummary {
        count: values.len(),
        sum,
        mean: sum / values.len() as f64,
        min,
        max,
    })
}

/// Finite numeric values of `column`, in record order.
///
/// Values are read by their leading number, so `"10kg"` counts as `10`. Entries with no leading
/// number are skipped.
pub fn numeric_values(dataset: &Dataset, column: &str) -> Vec<f64> {
    dataset
        .column_values(column)
        .filter_map(Value::leading_number)
        .collect()
}

/// Format `n` with exactly `digits` fractional digits.
///
/// Rounding works on the exact binary value and a tie goes away from zero, so `0.125` becomes
/// `"0.13"` while `1.005` (stored as `1.00499...`) becomes `"1.00"`.
pub fn to_fixed(n: f64, digits: usize) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // 1100 fractional digits hold the exact expansion of any finite f64.
    let exact = format!("{:.1100}", n.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().chain(frac.bytes().take(digits)).collect();
    if frac.as_bytes().get(digits).is_some_and(|&d| d >= b'5') {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if n < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&b| char::from(b)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&b| char::from(b)));
    }
    out
}

fn fixed2(n: f64) -> StatValue {
    StatValue::Text(to_fixed(n, 2))
}

/// Counters plus `<col>_avg/_min/_max/_sum` for every numeric column with values.
///
/// `dataset` must already be filtered to meaningful records.
pub fn compute_statistics(dataset: &Dataset, classification: &ColumnClassification) -> Statistics {
    let mut stats = Statistics::new();
    stats.insert("total_rows", StatValue::Count(dataset.row_count() as u64));
    stats.insert(
        "total_columns",
        StatValue::Count(dataset.records.first().map_or(0, |r| r.len()) as u64),
    );
    stats.insert(
        "numeric_columns",
        StatValue::Count(classification.numeric_count() as u64),
    );
    stats.insert(
        "categorical_columns",
        StatValue::Count(classification.categorical_count() as u64),
    );

    for col in classification.numeric() {
        if let Some(s) = summarize(&numeric_values(dataset, col)) {
            stats.insert(format!("{col}_avg"), fixed2(s.mean));
            stats.insert(format!("{col}_min"), fixed2(s.min));
            stats.insert(format!("{col}_max"), fixed2(s.max));
            stats.insert(format!("{col}_sum"), fixed2(s.sum));
        }
    }

    stats
}

/// Statistics for the terminal "no structured data" branch.
pub fn no_data_statistics() -> Statistics {
    let mut stats = Statistics::new();
    stats.insert("message", StatValue::Text("No structured data found".to_string()));
    stats.insert("file_processed", StatValue::Flag(true));
    stats
}
