#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::unique_header_names;
use crate::error::ExtractionError;
use crate::types::{Dataset, Record, Value};

/// Extract records from the first sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.).
///
/// Behavior:
/// - Only the first sheet is read
/// - The first row of the used range is the header row
/// - Blank header cells are named `__EMPTY`, `__EMPTY_1`, ...; repeated names get `_1`, `_2`, ...
/// - Empty cells leave the key absent; fully blank rows are skipped
/// - Numbers and date-times become [`Value::Number`] (date-times as Excel serial values)
pub fn extract_excel_records(bytes: &[u8]) -> Result<Dataset, ExtractionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractionError::Unsupported {
            message: "workbook has no sheets".to_string(),
        })??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Dataset::default());
    };
    let headers = header_names(header_row);

    let mut records = Vec::new();
    for row in rows {
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(name, cell)| convert_cell(cell).map(|v| (name.as_str(), v)))
            .collect();
        if !record.is_empty() {
            records.push(record);
        }
    }

    tracing::debug!(columns = headers.len(), rows = records.len(), "read first worksheet");
    Ok(Dataset::new(records))
}

fn header_names(row: &[Data]) -> Vec<String> {
    unique_header_names(row.iter().map(|cell| match cell_to_header_string(cell) {
        s if s.trim().is_empty() => "__EMPTY".to_string(),
        s => s.trim().to_string(),
    }))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> Option<Value> {
    match c {
        Data::Empty => None,
        Data::String(s) => Some(Value::text(s.as_str())),
        Data::Int(i) => Some(Value::Number(*i as f64)),
        Data::Float(f) => Some(Value::Number(*f)),
        Data::DateTime(dt) => Some(Value::Number(dt.as_f64())),
        Data::Bool(b) => Some(Value::text(b.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::text(s.as_str())),
        Data::Error(e) => Some(Value::text(e.to_string())),
    }
}
