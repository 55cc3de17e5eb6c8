//! Observer hooks for analysis outcomes.
//!
//! [`crate::analyzer`] reports every call to an optional [`AnalysisObserver`]: successes with
//! row/chart counts, degraded extractions (a format failure replaced by a diagnostic record), and
//! fatal failures. Alerts fire when a severity meets [`crate::AnalysisOptions::alert_at_or_above`].

use std::fmt;
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::ingestion::SourceFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisSeverity {
    /// Informational event.
    Info,
    /// Degraded but completed (diagnostic record emitted).
    Warning,
    /// Operation failed.
    Error,
    /// The uploaded bytes could not be read.
    Critical,
}

/// Context about one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Declared file name.
    pub file_name: String,
    /// Format used for extraction; `None` when the bytes could not be read.
    pub format: Option<SourceFormat>,
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Rows in the result's raw data.
    pub rows: usize,
    /// Charts emitted.
    pub charts: usize,
}

/// Observer interface for analysis outcomes.
pub trait AnalysisObserver: Send + Sync {
    /// Called when an analysis returns a result (including degraded and empty ones).
    fn on_success(&self, _ctx: &AnalysisContext, _stats: AnalysisStats) {}

    /// Called when extraction failed and a diagnostic record was substituted.
    fn on_degraded(&self, _ctx: &AnalysisContext, _severity: AnalysisSeverity, _reason: &str) {}

    /// Called when the analysis fails.
    fn on_failure(&self, _ctx: &AnalysisContext, _severity: AnalysisSeverity, _error: &AnalysisError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn AnalysisObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn AnalysisObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl AnalysisObserver for CompositeObserver {
    fn on_success(&self, ctx: &AnalysisContext, stats: AnalysisStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_degraded(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, reason: &str) {
        for o in &self.observers {
            o.on_degraded(ctx, severity, reason);
        }
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits analysis events as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn on_success(&self, ctx: &AnalysisContext, stats: AnalysisStats) {
        tracing::info!(
            file = %ctx.file_name,
            format = ?ctx.format,
            rows = stats.rows,
            charts = stats.charts,
            "analysis ok"
        );
    }

    fn on_degraded(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, reason: &str) {
        tracing::warn!(
            file = %ctx.file_name,
            format = ?ctx.format,
            ?severity,
            reason,
            "analysis degraded"
        );
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        tracing::error!(
            file = %ctx.file_name,
            format = ?ctx.format,
            ?severity,
            %error,
            "analysis failed"
        );
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: AnalysisSeverity, error: &AnalysisError) {
        tracing::error!(
            alert = true,
            file = %ctx.file_name,
            format = ?ctx.format,
            ?severity,
            %error,
            "analysis alert"
        );
    }
}
