//! Delimited-text (CSV) extraction.

use super::unique_header_names;
use crate::error::ExtractionError;
use crate::types::{Dataset, Record, Value};

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];
const DELIMITER_SAMPLE_ROWS: usize = 10;

/// Extract records from CSV text.
///
/// Rules:
///
/// - The delimiter is detected from `,`, tab, `|` and `;` (see [`detect_delimiter`]).
/// - The first line is the header row; header names are trimmed and repeated names get `_1`,
///   `_2`, ... suffixes.
/// - Blank lines are skipped.
/// - Ragged rows are accepted: missing trailing cells leave the key absent, extra cells are
///   dropped.
/// - Records whose values are all empty are removed.
pub fn extract_csv_records(text: &str) -> Result<Dataset, ExtractionError> {
    let parsed = parse_csv_records(text)?;
    Ok(parsed.meaningful())
}

/// Parse CSV text without removing all-empty records.
///
/// The ambiguous-text path needs the raw record count to decide whether to fall back to the
/// free-text heuristic.
pub fn parse_csv_records(text: &str) -> Result<Dataset, ExtractionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_delimiter(text))
        .from_reader(text.as_bytes());
    extract_csv_from_reader(&mut rdr)
}

/// Guess the field delimiter of `text`.
///
/// Each candidate parses the first ten rows. A candidate qualifies when rows average two or more
/// fields; among those, the one whose field count varies least between consecutive rows wins,
/// provided it also yields more fields on average than the previous best. Falls back to `,`.
pub fn detect_delimiter(text: &str) -> u8 {
    let mut best: Option<(u8, usize, f64)> = None;

    for delimiter in DELIMITER_CANDIDATES {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());
        let counts: Vec<usize> = rdr
            .records()
            .take(DELIMITER_SAMPLE_ROWS)
            .filter_map(Result::ok)
            .map(|r| r.len())
            .collect();
        if counts.is_empty() {
            continue;
        }

        let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        let better = match best {
            None => true,
            Some((_, best_delta, best_avg)) => delta <= best_delta && avg > best_avg,
        };
        if avg > 1.99 && better {
            best = Some((delimiter, delta, avg));
        }
    }

    let delimiter = best.map_or(b',', |(d, _, _)| d);
    tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "detected delimiter");
    delimiter
}

/// Extract records from an existing CSV reader.
pub fn extract_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Dataset, ExtractionError> {
    let headers = unique_header_names(rdr.headers()?.iter().map(|h| h.trim().to_owned()));

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, raw)| (name.as_str(), Value::text(raw)))
            .collect();
        records.push(record);
    }

    tracing::debug!(columns = headers.len(), rows = records.len(), "parsed delimited text");
    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::{detect_delimiter, extract_csv_records, parse_csv_records};
    use crate::types::Value;

    #[test]
    fn header_names_are_trimmed() {
        let ds = extract_csv_records(" a , b\n1,2\n").unwrap();
        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert_eq!(ds.records[0].get("b"), Some(&Value::text("2")));
    }

    #[test]
    fn all_empty_rows_are_dropped_after_parsing() {
        let raw = parse_csv_records("a,b\n,\n1,2\n").unwrap();
        assert_eq!(raw.row_count(), 2);
        let ds = extract_csv_records("a,b\n,\n1,2\n").unwrap();
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn short_rows_leave_keys_absent() {
        let ds = extract_csv_records("a,b,c\n1,2\n").unwrap();
        let r = &ds.records[0];
        assert_eq!(r.len(), 2);
        assert!(r.get("c").is_none());
    }

    #[test]
    fn delimiter_is_detected_from_common_candidates() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(detect_delimiter("a\tb\n1\t2\n"), b'\t');
        assert_eq!(detect_delimiter("a|b\n1|2\n"), b'|');
        assert_eq!(detect_delimiter("v\n1\n2\n"), b',');
    }

    #[test]
    fn commas_inside_semicolon_rows_stay_in_the_cell() {
        let ds = extract_csv_records("name;price\nWidget;1,50\nGadget;2,75\n").unwrap();
        assert_eq!(ds.column_names(), vec!["name", "price"]);
        assert_eq!(ds.records[1].get("price"), Some(&Value::text("2,75")));
    }

    #[test]
    fn duplicate_headers_are_renamed() {
        let ds = extract_csv_records("id,name,name\n1,Ada,Lovelace\n").unwrap();
        assert_eq!(ds.column_names(), vec!["id", "name", "name_1"]);
        assert_eq!(ds.records[0].get("name"), Some(&Value::text("Ada")));
        assert_eq!(ds.records[0].get("name_1"), Some(&Value::text("Lovelace")));
    }
}
