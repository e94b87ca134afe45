//! Fetch context bundling the API client with run settings.
//!
//! Commands build one context from configuration and borrow everything they
//! need from it: the API client for single calls and a ready-to-run
//! [`SamplePipeline`] for the windowed fetch.

use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::error::{HttpError, PlanError};
use crate::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::pipeline::{DEFAULT_MAX_CONCURRENCY, SamplePipeline};
use crate::progress::ProgressReporter;

/// Default width of a sampling window, in minutes.
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for API access and the windowed fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// API base URL.
    pub base_url: String,
    /// HTTP transport timeout.
    pub timeout: Duration,
    /// Width of each sampling window, in minutes.
    pub window_minutes: i64,
    /// Cap on in-flight window requests; `0` means one per window.
    pub max_concurrency: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            window_minutes: DEFAULT_WINDOW_MINUTES,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl FetchSettings {
    /// The window width as a chrono duration.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NonPositiveWidth`] for zero or negative minutes
    /// and [`PlanError::WidthOutOfRange`] when the minutes do not fit a
    /// chrono duration.
    pub fn window_width(&self) -> Result<chrono::Duration, PlanError> {
        if self.window_minutes <= 0 {
            return Err(PlanError::NonPositiveWidth(self.window_minutes.saturating_mul(60)));
        }
        chrono::TimeDelta::try_minutes(self.window_minutes)
            .ok_or(PlanError::WidthOutOfRange(self.window_minutes.saturating_mul(60)))
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Everything a command needs to talk to the API.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// API client.
    pub api: Arc<ApiClient>,
    /// Settings the client was built from.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, HttpError> {
        let http = HttpClient::with_timeout(&settings.base_url, settings.timeout)?;
        Ok(Self {
            api: Arc::new(ApiClient::new(http)),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// A pipeline over this context's API client, using its concurrency cap.
    pub fn sample_pipeline(&self, progress: Arc<dyn ProgressReporter>) -> SamplePipeline {
        SamplePipeline::new(self.api.clone())
            .with_progress(progress)
            .with_max_concurrency(self.settings.max_concurrency)
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a [`FetchContext`].
#[derive(Debug, Default)]
pub struct FetchContextBuilder {
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all settings at once.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.base_url = base_url.into();
        self
    }

    /// Sets the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the window width in minutes.
    pub fn window_minutes(mut self, minutes: i64) -> Self {
        self.settings.window_minutes = minutes;
        self
    }

    /// Sets the in-flight cap.
    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.settings.max_concurrency = max;
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// See [`FetchContext::with_settings`].
    pub fn build(self) -> Result<FetchContext, HttpError> {
        FetchContext::with_settings(self.settings)
    }
}

// ============================================================================
// Tests
// ============================================================================
