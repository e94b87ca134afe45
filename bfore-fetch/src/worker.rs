//! Fetch worker: one window, one request.
//!
//! A worker turns a [`TimeWindow`] into exactly one [`FetchOutcome`] and
//! exactly one progress tick. Nothing escapes it: transport errors, bad
//! statuses, undecodable bodies and even panics in the fetcher all become a
//! [`FetchOutcome::Failure`] for that window alone.

use async_trait::async_trait;
use bfore_core::{ScoredDomain, Session, TimeWindow};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::progress::{ProgressReporter, TickGuard};

// ============================================================================
// Sample Query
// ============================================================================

/// Caller-supplied scalars sent with every window request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleQuery {
    /// How many records per request the API should return at most.
    pub count: u32,
    /// Minimum PreCrime score.
    pub min_score: f64,
}

impl SampleQuery {
    /// Creates a query.
    pub fn new(count: u32, min_score: f64) -> Self {
        Self { count, min_score }
    }
}

// ============================================================================
// Window Fetcher Trait
// ============================================================================

/// Something that can fetch the scored domains of one window.
///
/// [`crate::ApiClient`] is the real implementation; tests provide their own.
#[async_trait]
pub trait WindowFetcher: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Performs one request for `window`. No retries.
    async fn fetch(
        &self,
        window: &TimeWindow,
        session: &Session,
        query: &SampleQuery,
    ) -> Result<Vec<ScoredDomain>, FetchError>;
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// What one window produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The request succeeded; `items` may be empty.
    Success {
        /// The window fetched.
        window: TimeWindow,
        /// Decoded items.
        items: Vec<ScoredDomain>,
    },
    /// The request failed. Terminal for this window only.
    Failure {
        /// The window fetched.
        window: TimeWindow,
        /// Why it failed.
        cause: FetchError,
    },
}

impl FetchOutcome {
    /// The window this outcome belongs to.
    pub fn window(&self) -> &TimeWindow {
        match self {
            Self::Success { window, .. } | Self::Failure { window, .. } => window,
        }
    }

    /// Returns true for [`FetchOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

// ============================================================================
// Worker
// ============================================================================

/// Fetches one window and ticks `progress` once, whatever happens.
pub async fn fetch_window(
    fetcher: &dyn WindowFetcher,
    window: TimeWindow,
    session: &Session,
    query: &SampleQuery,
    progress: Arc<dyn ProgressReporter>,
) -> FetchOutcome {
    let _tick = TickGuard::new(progress);

    debug!(fetcher = fetcher.id(), window = %window, "Fetching window");

    let attempt = AssertUnwindSafe(fetcher.fetch(&window, session, query))
        .catch_unwind()
        .await;

    match attempt {
        Ok(Ok(items)) => {
            debug!(window = %window, count = items.len(), "Window fetched");
            FetchOutcome::Success { window, items }
        }
        Ok(Err(cause)) => {
            warn!(window = %window, error = %cause, "Window fetch failed");
            FetchOutcome::Failure { window, cause }
        }
        Err(panic) => {
            let cause = FetchError::WorkerPanicked(panic_message(panic.as_ref()));
            warn!(window = %window, error = %cause, "Window fetch failed");
            FetchOutcome::Failure { window, cause }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
