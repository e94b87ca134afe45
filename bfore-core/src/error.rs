//! Core error types for bfore.

use thiserror::Error;

/// Core error type for bfore model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A time window whose start is not strictly before its end.
    #[error("Invalid time window: {start} is not before {end}")]
    InvalidWindow {
        /// Window start as given.
        start: String,
        /// Window end as given.
        end: String,
    },

    /// A timestamp that does not match the expected layout.
    #[error("Invalid timestamp '{value}', expected YYYY-MM-DDTHH:MM:00")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
    },
}
