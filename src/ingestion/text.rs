//! Free-text heuristics for documents without an obvious table structure.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::SNIPPET_CHARS;
use crate::types::{Dataset, Record, Value, parse_float_prefix};

static NUMBER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+[\s,]+[0-9.]+").expect("number-line pattern is valid")
});

static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("number-run pattern is valid"));

/// Decode uploaded bytes as text.
///
/// A byte order mark selects UTF-8 or UTF-16; anything else is read as UTF-8 with invalid
/// sequences replaced.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed sequences while decoding");
    }
    text
}

/// Extract records from unstructured text.
///
/// Each non-blank line is inspected:
///
/// - `key: value` lines (or tab-separated lines) become one record of alternating key/value
///   pairs: `parts[0]=parts[1], parts[2]=parts[3], ...`. A trailing unmatched part is dropped.
/// - Lines starting `<digits><space or comma><number>` become `{index, value}`.
///
/// If no line matches, the result is a single `{content}` record holding the first 500
/// characters of the text, so non-empty input never yields zero records.
pub fn extract_text_records(text: &str) -> Dataset {
    let mut records = Vec::new();

    for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
        if line.contains(':') || line.contains('\t') {
            let delimiter = if line.contains(':') { ':' } else { '\t' };
            let parts: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            if parts.len() >= 2 {
                let record: Record = parts
                    .chunks_exact(2)
                    .map(|pair| (pair[0], pair[1]))
                    .collect();
                if !record.is_empty() {
                    records.push(record);
                }
            }
        } else if NUMBER_LINE.is_match(line) {
            let runs: Vec<&str> = NUMBER_RUN.find_iter(line).map(|m| m.as_str()).collect();
            if let [index, value, ..] = runs.as_slice() {
                let mut record = Record::new();
                record.insert("index", *index);
                record.insert("value", parse_float_prefix(value).map_or(Value::Empty, Value::Number));
                records.push(record);
            }
        }
    }

    if records.is_empty() {
        let snippet: String = text.chars().take(SNIPPET_CHARS).collect();
        tracing::debug!("no structured lines found, keeping a content snippet");
        records.push(Record::from_iter([("content", snippet)]));
    }

    Dataset::new(records)
}
