//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a single API call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The API answered with something other than 200 OK.
    #[error("API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The body did not decode into the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Login was rejected or returned no token.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The call needs a session and none is active.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The window worker panicked.
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

// ============================================================================
// Plan Error
// ============================================================================

/// Error type for window planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Window width must be strictly positive.
    #[error("Window width must be positive, got {0} seconds")]
    NonPositiveWidth(i64),

    /// A window of this width would end past the representable date range.
    #[error("Window width of {0} seconds is out of range")]
    WidthOutOfRange(i64),
}

// ============================================================================
// Pipeline Error
// ============================================================================

/// Job-level error of the windowed fetch pipeline.
///
/// Per-window failures never show up here; they are recorded in the
/// pipeline report instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No active session. Nothing was launched.
    #[error("You must be logged in. Please run the 'login' command first.")]
    NotAuthenticated,

    /// The requested range could not be planned.
    #[error("Invalid window plan: {0}")]
    Plan(#[from] PlanError),
}
