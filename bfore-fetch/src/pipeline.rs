//! Windowed fan-out pipeline.
//!
//! The pipeline launches one task per window, lets at most
//! `max_concurrency` of them talk to the API at once, waits for every one
//! of them and folds their outcomes into a single sorted
//! [`PipelineReport`]. A failed window never fails the run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bfore_core::{Session, TimeWindow};
use chrono::{Duration, NaiveDateTime};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

use crate::aggregate::{Aggregator, PipelineReport};
use crate::error::PipelineError;
use crate::planner::plan;
use crate::progress::{NoProgress, ProgressReporter};
use crate::worker::{SampleQuery, WindowFetcher, fetch_window};

/// Default cap on in-flight window requests.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

// ============================================================================
// Sample Pipeline
// ============================================================================

/// Fetches many windows concurrently and merges the results.
pub struct SamplePipeline {
    fetcher: Arc<dyn WindowFetcher>,
    progress: Arc<dyn ProgressReporter>,
    max_concurrency: usize,
}

impl SamplePipeline {
    /// Creates a pipeline with no progress reporting and the default cap.
    pub fn new(fetcher: Arc<dyn WindowFetcher>) -> Self {
        Self {
            fetcher,
            progress: Arc::new(NoProgress),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Sets the progress reporter.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the in-flight cap. `0` gives every window its own permit.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// The configured in-flight cap.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    fn permits_for(&self, windows: usize) -> usize {
        let permits = if self.max_concurrency == 0 {
            windows.max(1)
        } else {
            self.max_concurrency
        };
        permits.min(Semaphore::MAX_PERMITS)
    }

    /// Plans `[start, end)` into windows of `width` and runs them.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NotAuthenticated`] before planning if the
    /// session is empty, and [`PipelineError::Plan`] for a bad width.
    pub async fn run_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        width: Duration,
        session: &Session,
        query: &SampleQuery,
    ) -> Result<PipelineReport, PipelineError> {
        if !session.is_authenticated() {
            return Err(PipelineError::NotAuthenticated);
        }
        let windows = plan(start, end, width)?;
        self.run(windows, session, query).await
    }

    /// Runs one request per window and waits for all of them.
    ///
    /// Progress gets `init(windows.len())` and then one tick per window.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NotAuthenticated`] if the session is empty.
    /// Nothing is launched and no progress is reported in that case.
    #[instrument(skip_all, fields(fetcher = self.fetcher.id(), windows = windows.len()))]
    pub async fn run(
        &self,
        windows: Vec<TimeWindow>,
        session: &Session,
        query: &SampleQuery,
    ) -> Result<PipelineReport, PipelineError> {
        if !session.is_authenticated() {
            return Err(PipelineError::NotAuthenticated);
        }

        let started = Instant::now();
        let total = windows.len();
        let permits = self.permits_for(total);
        self.progress.init(total);

        info!(total, permits, "Starting windowed fetch");

        let semaphore = Arc::new(Semaphore::new(permits));
        let session = Arc::new(session.clone());
        let query = *query;

        // Windows still owed an outcome, by multiplicity.
        let mut pending: HashMap<TimeWindow, usize> = HashMap::with_capacity(total);
        let mut tasks = JoinSet::new();

        for window in windows {
            *pending.entry(window).or_default() += 1;

            let fetcher = Arc::clone(&self.fetcher);
            let progress = Arc::clone(&self.progress);
            let semaphore = Arc::clone(&semaphore);
            let session = Arc::clone(&session);

            tasks.spawn(async move {
                // The semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                fetch_window(fetcher.as_ref(), window, &session, &query, progress).await
            });
        }

        let mut aggregator = Aggregator::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    if let Some(left) = pending.get_mut(outcome.window()) {
                        *left = left.saturating_sub(1);
                    }
                    aggregator.push(outcome);
                }
                Err(e) => error!(error = %e, "Window task did not complete"),
            }
        }

        for (window, left) in pending {
            for _ in 0..left {
                warn!(window = %window, "Window produced no outcome");
                aggregator.push_lost(window, "window task did not complete");
            }
        }

        let report = aggregator.finish(total);
        info!(
            items = report.items.len(),
            failed = report.windows_failed(),
            total,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Windowed fetch finished"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for SamplePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplePipeline")
            .field("fetcher", &self.fetcher.id())
            .field("max_concurrency", &self.max_concurrency)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
