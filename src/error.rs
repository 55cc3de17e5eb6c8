use thiserror::Error;

/// Convenience result type for analysis entry points.
pub type AnalysisOutcome<T> = Result<T, AnalysisError>;

/// Error type returned by analysis entry points.
///
/// Only a failure to obtain the uploaded bytes is fatal. Format-specific parsing failures are
/// absorbed by the extractors and surface as diagnostic records instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The uploaded file could not be read at all.
    #[error("failed to process file: {reason}")]
    FileProcessing { reason: String },
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileProcessing {
            reason: err.to_string(),
        }
    }
}

/// Format-specific extraction failure.
///
/// Never returned from the public entry points: the extractor boundary converts it into a
/// diagnostic [`crate::types::Record`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Delimited-text parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// PDF loading or text extraction error.
    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The input cannot be handled by this build or is structurally unusable.
    #[error("unsupported input: {message}")]
    Unsupported { message: String },
}
