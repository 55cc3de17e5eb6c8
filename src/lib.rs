//! `data-insight` turns an uploaded document into a typed analysis: extracted records, column
//! classification, summary statistics, chart descriptors and short insights.
//!
//! The primary entrypoint is [`analyze`], which takes the raw bytes, the declared media type and
//! the file name. It never fails on malformed content: unrecognized formats fall through to a
//! plain-text heuristic, and a broken PDF or workbook degrades into a single diagnostic record.
//! The only error is [`AnalysisError::FileProcessing`], raised when the bytes themselves cannot be
//! read (see [`analyze_reader`] and [`analyze_path`]).
//!
//! ## What you can analyze
//!
//! Formats are detected from the media type first, then the file name extension:
//!
//! - **PDF**: `application/pdf`, `.pdf` (text layer, then the free-text heuristic)
//! - **CSV**: `text/csv`, `.csv`
//! - **Spreadsheets** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`, or a media type
//!   mentioning `spreadsheet`/`excel`; the first sheet is read
//! - **Word documents**: `.doc`, `.docx`, decoded best-effort as text
//! - **Anything else**: plain text; comma-separated text is tried as CSV first
//!
//! ## Quick example
//!
//! ```rust
//! use data_insight::analyze;
//!
//! # fn main() -> Result<(), data_insight::AnalysisError> {
//! let text = b"Name: Ada\nRole: Engineer\n";
//! let result = analyze(text, "text/plain", "notes.txt")?;
//! assert_eq!(result.raw_data.row_count(), 2);
//! assert_eq!(result.insights[0], "Analyzed 2 rows of data");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format detection and per-format record extraction
//! - [`analysis`]: classification, statistics, chart selection, insights
//! - [`analyzer`]: pipeline entrypoints and options
//! - [`execution`]: parallel batch analysis
//! - [`observability`]: observer hooks for outcomes and alerts
//! - [`types`]: records, values and datasets
//! - [`error`]: error types

pub mod analysis;
pub mod analyzer;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod observability;
pub mod types;

pub use analysis::AnalysisResult;
pub use analyzer::{AnalysisOptions, AnalysisRequest, analyze, analyze_path, analyze_reader, analyze_with_options};
pub use error::{AnalysisError, AnalysisOutcome};
