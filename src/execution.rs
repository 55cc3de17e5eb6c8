//! Parallel execution of independent analyses.
//!
//! Each [`AnalysisRequest`] owns its bytes and produces its own result, so requests can run on
//! a shared thread pool without coordination.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::analysis::AnalysisResult;
use crate::analyzer::AnalysisRequest;
use crate::error::AnalysisOutcome;

/// Configuration for the [`BatchEngine`].
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

/// Runs many analyses on a dedicated rayon pool.
pub struct BatchEngine {
    pool: ThreadPool,
}

impl BatchEngine {
    /// Create a new engine with the given options.
    pub fn new(opts: ExecutionOptions) -> Result<Self, ThreadPoolBuildError> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("data-insight-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Analyze every request; results are returned in input order.
    pub fn analyze_all(&self, requests: &[AnalysisRequest]) -> Vec<AnalysisOutcome<AnalysisResult>> {
        tracing::debug!(requests = requests.len(), threads = self.num_threads(), "batch started");
        self.pool
            .install(|| requests.par_iter().map(AnalysisRequest::run).collect())
    }
}
