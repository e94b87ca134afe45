//! Time windows.
//!
//! The domain list endpoint only answers for short slices of time, so a
//! requested range is cut into [`TimeWindow`]s and each one is fetched on
//! its own. Timestamps are naive local date-times: the API receives them
//! exactly as the user typed them, without any zone conversion.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Layout of timestamps sent to and accepted from the API.
///
/// Seconds are a literal `00`: the API works at minute precision.
pub const WINDOW_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

/// Formats a timestamp with [`WINDOW_TIMESTAMP_FORMAT`].
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(WINDOW_TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp in [`WINDOW_TIMESTAMP_FORMAT`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if the input does not match the
/// layout, including inputs whose seconds are not `00`.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, CoreError> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, WINDOW_TIMESTAMP_FORMAT).map_err(|_| {
        CoreError::InvalidTimestamp {
            value: trimmed.to_string(),
        }
    })
}

/// A half-open interval `[start, end)` of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidWindow`] unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidWindow {
                start: format_timestamp(&start),
                end: format_timestamp(&end),
            });
        }
        Ok(Self { start, end })
    }

    /// Window start (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Window end (exclusive).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Width of the window.
    pub fn width(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if `ts` falls inside `[start, end)`.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.start && *ts < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            format_timestamp(&self.start),
            format_timestamp(&self.end)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        let t = ts("2024-03-01T10:30:00");
        assert_eq!(format_timestamp(&t), "2024-03-01T10:30:00");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp("  2024-03-01T10:30:00\n").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_zero_seconds() {
        assert!(parse_timestamp("2024-03-01T10:30:15").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_window_requires_start_before_end() {
        let a = ts("2024-03-01T10:00:00");
        let b = ts("2024-03-01T10:30:00");
        assert!(TimeWindow::new(a, b).is_ok());
        assert!(TimeWindow::new(b, a).is_err());
        assert!(TimeWindow::new(a, a).is_err());
    }

    #[test]
    fn test_window_is_half_open() {
        let w = TimeWindow::new(ts("2024-03-01T10:00:00"), ts("2024-03-01T10:30:00")).unwrap();
        assert!(w.contains(&ts("2024-03-01T10:00:00")));
        assert!(w.contains(&ts("2024-03-01T10:29:00")));
        assert!(!w.contains(&ts("2024-03-01T10:30:00")));
        assert_eq!(w.width(), Duration::minutes(30));
    }

    #[test]
    fn test_window_display() {
        let w = TimeWindow::new(ts("2024-03-01T10:00:00"), ts("2024-03-01T10:30:00")).unwrap();
        assert_eq!(w.to_string(), "[2024-03-01T10:00:00, 2024-03-01T10:30:00)");
    }
}
