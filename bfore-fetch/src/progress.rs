//! Progress reporting for the windowed pipeline.
//!
//! The pipeline calls [`ProgressReporter::init`] once with the number of
//! windows and [`ProgressReporter::tick`] once per finished window, from
//! whichever task finished it. Implementations must be cheap and must not
//! block: progress is a display concern and has no say in the pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives pipeline progress.
pub trait ProgressReporter: Send + Sync {
    /// Called once, before any window is launched.
    fn init(&self, total: usize);

    /// Called once per finished window, success or failure.
    fn tick(&self);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn init(&self, _total: usize) {}

    fn tick(&self) {}
}

/// Counts progress with atomics.
#[derive(Debug, Default)]
pub struct CountingProgress {
    total: AtomicUsize,
    done: AtomicUsize,
    inits: AtomicUsize,
}

impl CountingProgress {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total announced by the last `init`.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }

    /// Number of ticks received.
    pub fn done(&self) -> usize {
        self.done.load(Ordering::Acquire)
    }

    /// Number of `init` calls received.
    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::Acquire)
    }

    /// Returns true once every announced window has ticked.
    pub fn is_complete(&self) -> bool {
        self.inits() > 0 && self.done() >= self.total()
    }
}

impl ProgressReporter for CountingProgress {
    fn init(&self, total: usize) {
        self.total.store(total, Ordering::Release);
        self.done.store(0, Ordering::Release);
        self.inits.fetch_add(1, Ordering::AcqRel);
    }

    fn tick(&self) {
        self.done.fetch_add(1, Ordering::AcqRel);
    }
}

/// Ticks its reporter exactly once, when dropped.
///
/// A worker holds one of these for its whole lifetime, so the tick happens
/// on every exit path, unwinding included.
#[must_use = "the tick fires when the guard is dropped"]
pub struct TickGuard {
    progress: Arc<dyn ProgressReporter>,
}

impl TickGuard {
    /// Arms a guard for `progress`.
    pub fn new(progress: Arc<dyn ProgressReporter>) -> Self {
        Self { progress }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.progress.tick();
    }
}

impl std::fmt::Debug for TickGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickGuard").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
