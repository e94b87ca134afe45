// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bfore Fetch
//!
//! HTTP access to the BforeAI API and the windowed sampling pipeline.
//!
//! ## API
//!
//! - [`http::HttpClient`] - reqwest wrapper bound to one base URL, with tracing
//! - [`api::ApiClient`] - login, report list and domain list endpoints
//!
//! ## Windowed Pipeline
//!
//! A sampling request over `[start, end)` runs in four steps:
//!
//! 1. [`planner::plan`] cuts the range into fixed-width [`TimeWindow`]s
//! 2. [`SamplePipeline`] spawns one [`worker::fetch_window`] task per window,
//!    bounded by a semaphore
//! 3. Each worker yields one [`FetchOutcome`] and ticks the
//!    [`ProgressReporter`] exactly once
//! 4. The [`aggregate::Aggregator`] merges successes and sorts them with
//!    [`aggregate::finalize`]
//!
//! ## Example
//!
//! ```ignore
//! use bfore_fetch::{FetchContext, NoProgress, SampleQuery};
//! use std::sync::Arc;
//!
//! let ctx = FetchContext::builder().build()?;
//! let report = ctx
//!     .sample_pipeline(Arc::new(NoProgress))
//!     .run_range(start, end, ctx.settings.window_width()?, &session, &SampleQuery::new(100, 0.75))
//!     .await?;
//! println!("Found {} total domains.", report.items.len());
//! ```
//!
//! [`TimeWindow`]: bfore_core::TimeWindow

pub mod aggregate;
pub mod api;
pub mod context;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod planner;
pub mod progress;
pub mod worker;

// Errors
pub use error::{FetchError, HttpError, PipelineError, PlanError};

// API
pub use api::{ApiClient, ReportQuery};
pub use http::HttpClient;

// Pipeline
pub use aggregate::{Aggregator, PipelineReport, WindowFailure, finalize};
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use pipeline::{DEFAULT_MAX_CONCURRENCY, SamplePipeline};
pub use planner::{plan, window_count};
pub use progress::{CountingProgress, NoProgress, ProgressReporter, TickGuard};
pub use worker::{FetchOutcome, SampleQuery, WindowFetcher, fetch_window};
