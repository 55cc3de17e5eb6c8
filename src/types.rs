//! Core data model types for extraction and analysis.
//!
//! Extractors turn uploaded bytes into a [`Dataset`]: an ordered list of [`Record`]s, each an
//! ordered mapping from column name to a [`Value`].

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single loosely-typed cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value. Serializes as `null`.
    Empty,
    /// Text as it appeared in the source.
    Text(String),
    /// Native number (spreadsheet cells, numeric heuristics).
    Number(f64),
}

impl Value {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns `true` for [`Value::Empty`] and for text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Number(_) => false,
        }
    }

    /// Interpret the value as a finite number.
    ///
    /// Text is trimmed before parsing; `inf`/`NaN` spellings are rejected.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Empty => None,
            Value::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Read the leading number of the value, ignoring anything after it.
    ///
    /// `"10kg"` reads as `10.0` and `" -2.5e1 apples"` as `-25.0`. Used for column statistics once
    /// a column has been classified numeric; classification itself uses [`Value::as_number`].
    pub fn leading_number(&self) -> Option<f64> {
        match self {
            Value::Empty => None,
            Value::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Value::Text(s) => parse_float_prefix(s),
        }
    }

    /// Trimmed textual form used for category counting. Empty values yield `None`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Empty => None,
            Value::Number(n) => Some(n.to_string()),
            Value::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
        }
    }
}

/// Parse the longest prefix of `s` that forms a decimal number.
///
/// Leading whitespace is skipped. The prefix is an optional sign, digits with at most one dot
/// (at least one digit overall), and an exponent only when digits follow the `e`. Non-finite
/// results are rejected.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// One extracted row: column name → value, in insertion order, with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a value by column name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record is meaningful when at least one of its values is non-empty.
    pub fn is_meaningful(&self) -> bool {
        self.fields.iter().any(|(_, v)| !v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Ordered collection of records extracted from one file.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names, taken from the first record.
    pub fn column_names(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|r| r.keys().collect())
            .unwrap_or_default()
    }

    /// All values for `column` in record order; records without the key are skipped.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records.iter().filter_map(move |r| r.get(column))
    }

    /// Create a new dataset containing only records that match `predicate`.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self { records }
    }

    /// Create a new dataset without records whose values are all empty.
    pub fn meaningful(&self) -> Self {
        self.filter_records(Record::is_meaningful)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
