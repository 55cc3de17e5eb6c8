//! Pipeline entry points.
//!
//! [`analyze`] is the core: bytes + declared media type + file name in, [`AnalysisResult`] out.
//! It is a pure function of its inputs; calling it twice on the same input yields equal results.
//!
//! - If [`AnalysisOptions::format`] is `None`, the format is detected from the media type and
//!   file name.
//! - If an [`AnalysisObserver`] is provided, success/degradation/failure/alerts are reported to it.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::{AnalysisResult, analyze_dataset};
use crate::error::{AnalysisError, AnalysisOutcome};
use crate::ingestion::{SourceFormat, extract_dataset};
use crate::observability::{AnalysisContext, AnalysisObserver, AnalysisSeverity, AnalysisStats};

/// Options controlling an analysis call.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct AnalysisOptions {
    /// If `None`, detect the format from media type and file name.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn AnalysisObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: AnalysisSeverity,
}

impl fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: AnalysisSeverity::Critical,
        }
    }
}

/// Analyze an uploaded file with default options.
///
/// # Examples
///
/// ```rust
/// use data_insight::analyze;
///
/// let csv = b"product,units\napple,3\npear,5\napple,4\n";
/// let result = analyze(csv, "text/csv", "sales.csv").unwrap();
///
/// assert_eq!(result.statistics.count("total_rows"), Some(3));
/// assert_eq!(result.statistics.text("units_sum"), Some("12.00"));
/// assert!(result.charts.iter().any(|c| c.title == "Count by product"));
/// ```
pub fn analyze(bytes: &[u8], media_type: &str, file_name: &str) -> AnalysisOutcome<AnalysisResult> {
    analyze_with_options(bytes, media_type, file_name, &AnalysisOptions::default())
}

/// Analyze an uploaded file.
///
/// Format-specific failures never surface as errors: they produce a diagnostic record and are
/// reported to the observer through `on_degraded`. With bytes already in memory this function
/// always returns `Ok`; the `Result` is kept so every entry point shares one signature.
pub fn analyze_with_options(
    bytes: &[u8],
    media_type: &str,
    file_name: &str,
    options: &AnalysisOptions,
) -> AnalysisOutcome<AnalysisResult> {
    let extraction = extract_dataset(bytes, media_type, file_name, options.format);
    let ctx = AnalysisContext {
        file_name: file_name.to_string(),
        format: Some(extraction.format),
    };

    if let (Some(obs), Some(reason)) = (options.observer.as_ref(), extraction.degraded.as_deref()) {
        obs.on_degraded(&ctx, AnalysisSeverity::Warning, reason);
    }

    let result = analyze_dataset(extraction.dataset);

    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(
            &ctx,
            AnalysisStats {
                rows: result.raw_data.row_count(),
                charts: result.charts.len(),
            },
        );
    }

    Ok(result)
}

/// Read all bytes from `reader`, then analyze them.
///
/// A read failure is the one fatal error: it is returned as
/// [`AnalysisError::FileProcessing`] and reported as [`AnalysisSeverity::Critical`].
pub fn analyze_reader<R: Read>(
    mut reader: R,
    media_type: &str,
    file_name: &str,
    options: &AnalysisOptions,
) -> AnalysisOutcome<AnalysisResult> {
    let mut bytes = Vec::new();
    if let Err(err) = reader.read_to_end(&mut bytes) {
        let err = AnalysisError::from(err);
        report_failure(file_name, options, &err);
        return Err(err);
    }
    analyze_with_options(&bytes, media_type, file_name, options)
}

/// Analyze a file on disk. The file name used for detection is the path's final component.
///
/// ```no_run
/// use data_insight::{AnalysisOptions, analyze_path};
///
/// # fn main() -> Result<(), data_insight::AnalysisError> {
/// let result = analyze_path("report.pdf", "", &AnalysisOptions::default())?;
/// for insight in &result.insights {
///     println!("{insight}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn analyze_path(
    path: impl AsRef<Path>,
    media_type: &str,
    options: &AnalysisOptions,
) -> AnalysisOutcome<AnalysisResult> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match std::fs::read(path) {
        Ok(bytes) => analyze_with_options(&bytes, media_type, &file_name, options),
        Err(err) => {
            let err = AnalysisError::FileProcessing {
                reason: format!("{} ({})", err, path.display()),
            };
            report_failure(&file_name, options, &err);
            Err(err)
        }
    }
}

fn report_failure(file_name: &str, options: &AnalysisOptions, err: &AnalysisError) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    let ctx = AnalysisContext {
        file_name: file_name.to_string(),
        format: None,
    };
    let sev = severity_for_error(err);
    obs.on_failure(&ctx, sev, err);
    if sev >= options.alert_at_or_above {
        obs.on_alert(&ctx, sev, err);
    }
}

fn severity_for_error(e: &AnalysisError) -> AnalysisSeverity {
    match e {
        AnalysisError::FileProcessing { .. } => AnalysisSeverity::Critical,
    }
}

/// Owned request object, e.g. for queuing uploads or batch execution.
#[derive(Clone)]
pub struct AnalysisRequest {
    /// Uploaded bytes.
    pub bytes: Arc<[u8]>,
    /// Declared media type (may be empty).
    pub media_type: String,
    /// Declared file name.
    pub file_name: String,
    /// Options controlling the analysis.
    pub options: AnalysisOptions,
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("bytes_len", &self.bytes.len())
            .field("media_type", &self.media_type)
            .field("file_name", &self.file_name)
            .field("options", &self.options)
            .finish()
    }
}

impl AnalysisRequest {
    /// Create a request with default options.
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            file_name: file_name.into(),
            options: AnalysisOptions::default(),
        }
    }

    /// Load a request from a file on disk.
    pub fn from_path(path: impl Into<PathBuf>, media_type: impl Into<String>) -> AnalysisOutcome<Self> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|err| AnalysisError::FileProcessing {
            reason: format!("{} ({})", err, path.display()),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(bytes, media_type, file_name))
    }

    /// Replace the options.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute the request by calling [`analyze_with_options`].
    pub fn run(&self) -> AnalysisOutcome<AnalysisResult> {
        analyze_with_options(&self.bytes, &self.media_type, &self.file_name, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{AnalysisOptions, AnalysisRequest, analyze, analyze_reader};

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn unreadable_input_is_the_single_fatal_error() {
        let err = analyze_reader(FailingReader, "text/csv", "x.csv", &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "failed to process file: disk on fire");
    }

    #[test]
    fn request_run_matches_direct_call() {
        let bytes = b"k: v\nn: 1\n".to_vec();
        let req = AnalysisRequest::new(bytes.clone(), "text/plain", "notes.txt");
        assert_eq!(req.run().unwrap(), analyze(&bytes, "text/plain", "notes.txt").unwrap());
    }
}
