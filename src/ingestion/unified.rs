//! Format detection and extractor dispatch.
//!
//! [`extract_dataset`] never fails: an unrecognized format falls through to the plain-text path,
//! and a format-specific failure becomes a single diagnostic record (see [`diagnostic_record`]).

use std::fmt;

use crate::error::ExtractionError;
use crate::types::{Dataset, Record};

use super::{csv, pdf, text};

/// Extraction strategy chosen for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// PDF document; text layer goes through the free-text heuristics.
    Pdf,
    /// Comma-separated values with a header row.
    Delimited,
    /// Spreadsheet/workbook formats (decoded with the `excel` feature).
    Spreadsheet,
    /// Word-processing document, decoded best-effort as text.
    WordProcessing,
    /// Plain text or anything unrecognized.
    PlainText,
}

impl SourceFormat {
    /// Pick a format from the declared media type and file name (first match wins).
    ///
    /// Both inputs are compared case-insensitively and media type parameters such as
    /// `; charset=utf-8` are ignored. Unknown inputs map to [`SourceFormat::PlainText`].
    pub fn detect(media_type: &str, file_name: &str) -> Self {
        let media = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let name = file_name.trim().to_lowercase();
        let has_ext = |exts: &[&str]| exts.iter().any(|ext| name.ends_with(ext));

        if media == "application/pdf" || has_ext(&[".pdf"]) {
            Self::Pdf
        } else if media == "text/csv" || has_ext(&[".csv"]) {
            Self::Delimited
        } else if media.contains("spreadsheet") || media.contains("excel") || has_ext(&[".xlsx", ".xls"]) {
            Self::Spreadsheet
        } else if media.contains("wordprocessingml")
            || media.contains("msword")
            || has_ext(&[".doc", ".docx"])
        {
            Self::WordProcessing
        } else {
            Self::PlainText
        }
    }

    /// Label used in diagnostic records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Delimited => "CSV",
            Self::Spreadsheet => "Spreadsheet",
            Self::WordProcessing => "Document",
            Self::PlainText => "Text",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the extraction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Format that was used.
    pub format: SourceFormat,
    /// Extracted records (not yet filtered for all-empty records, except where the extractor
    /// does so itself).
    pub dataset: Dataset,
    /// Set when the format extractor failed and `dataset` holds a diagnostic record instead.
    pub degraded: Option<String>,
}

/// Build the diagnostic record emitted when a format extractor fails.
pub fn diagnostic_record(file_name: &str, format: SourceFormat, error: &ExtractionError) -> Record {
    let mut record = Record::new();
    record.insert("filename", file_name);
    record.insert("type", format.label());
    record.insert("message", format!("{} parsing encountered an error", format.label()));
    record.insert("error", error.to_string());
    record
}

/// Run the extractor for `format` over `bytes`.
///
/// Pass `None` to detect the format from `media_type` and `file_name`.
pub fn extract_dataset(
    bytes: &[u8],
    media_type: &str,
    file_name: &str,
    format: Option<SourceFormat>,
) -> Extraction {
    let format = format.unwrap_or_else(|| SourceFormat::detect(media_type, file_name));
    tracing::debug!(%format, file_name, bytes = bytes.len(), "extracting records");

    let result = match format {
        SourceFormat::Pdf => pdf::extract_pdf_text(bytes).map(|t| text::extract_text_records(&t)),
        SourceFormat::Delimited => csv::extract_csv_records(&text::decode_text(bytes)),
        SourceFormat::Spreadsheet => extract_spreadsheet(bytes),
        SourceFormat::WordProcessing => Ok(text::extract_text_records(&text::decode_text(bytes))),
        SourceFormat::PlainText => Ok(extract_plain_text(&text::decode_text(bytes))),
    };

    match result {
        Ok(dataset) => Extraction {
            format,
            dataset,
            degraded: None,
        },
        Err(err) => {
            tracing::warn!(%format, file_name, error = %err, "extraction failed, emitting diagnostic record");
            Extraction {
                format,
                dataset: Dataset::new(vec![diagnostic_record(file_name, format, &err)]),
                degraded: Some(err.to_string()),
            }
        }
    }
}

/// Plain text: try CSV first when the text looks delimited, else the free-text heuristics.
fn extract_plain_text(content: &str) -> Dataset {
    if content.contains(',') && content.split('\n').count() > 1 {
        match csv::parse_csv_records(content) {
            Ok(parsed) if !parsed.is_empty() => return parsed.meaningful(),
            Ok(_) => {}
            Err(err) => tracing::debug!(error = %err, "delimited parse failed, using text heuristics"),
        }
    }
    text::extract_text_records(content)
}

fn extract_spreadsheet(bytes: &[u8]) -> Result<Dataset, ExtractionError> {
    // Avoid unused warnings when the feature is off.
    let _ = bytes;

    #[cfg(feature = "excel")]
    {
        super::excel::extract_excel_records(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(ExtractionError::Unsupported {
            message: "spreadsheet extraction not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
