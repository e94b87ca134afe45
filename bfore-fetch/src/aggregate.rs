//! Aggregation and ordering of window results.
//!
//! [`Aggregator`] is fed every [`FetchOutcome`] in arrival order by the one
//! task draining the workers, so it needs no locking. Once every window has
//! reported, [`Aggregator::finish`] sorts the items and produces the
//! [`PipelineReport`].

use bfore_core::{ScoredDomain, TimeWindow};
use serde::Serialize;
use tracing::warn;

use crate::worker::FetchOutcome;

/// Sorts items ascending by their `ScoreCreated` key.
///
/// Keys are compared as plain strings, which matches time order only for
/// zero-padded ISO-8601 keys. The sort is stable: equal keys keep the order
/// they arrived in. Sorting an already finalized sequence is a no-op.
pub fn finalize(mut items: Vec<ScoredDomain>) -> Vec<ScoredDomain> {
    let odd = items.iter().filter(|d| !d.has_canonical_key()).count();
    if odd > 0 {
        warn!(
            count = odd,
            "Some ScoreCreated values are not YYYY-MM-DDTHH:MM:SS; their order may not be chronological"
        );
    }

    items.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    items
}

/// A window that produced no data.
#[derive(Debug, Clone, Serialize)]
pub struct WindowFailure {
    /// The failed window.
    pub window: TimeWindow,
    /// Rendered cause.
    pub cause: String,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// All items from all successful windows, finalized.
    pub items: Vec<ScoredDomain>,
    /// Number of windows launched.
    pub windows_total: usize,
    /// Windows that failed, in arrival order.
    pub failures: Vec<WindowFailure>,
}

impl PipelineReport {
    /// Number of failed windows.
    pub fn windows_failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of successful windows.
    pub fn windows_succeeded(&self) -> usize {
        self.windows_total.saturating_sub(self.failures.len())
    }

    /// Returns true if any window failed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Collects outcomes as they arrive.
#[derive(Debug, Default)]
pub struct Aggregator {
    items: Vec<ScoredDomain>,
    failures: Vec<WindowFailure>,
    received: usize,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome. Successful items are appended in arrival order.
    pub fn push(&mut self, outcome: FetchOutcome) {
        self.received += 1;
        match outcome {
            FetchOutcome::Success { mut items, .. } => self.items.append(&mut items),
            FetchOutcome::Failure { window, cause } => self.failures.push(WindowFailure {
                window,
                cause: cause.to_string(),
            }),
        }
    }

    /// Records a window whose worker never produced an outcome.
    pub fn push_lost(&mut self, window: TimeWindow, cause: impl Into<String>) {
        self.received += 1;
        self.failures.push(WindowFailure {
            window,
            cause: cause.into(),
        });
    }

    /// Number of outcomes recorded so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Items collected so far, unsorted.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items were collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sorts the collected items and builds the report.
    pub fn finish(self, windows_total: usize) -> PipelineReport {
        PipelineReport {
            items: finalize(self.items),
            windows_total,
            failures: self.failures,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
