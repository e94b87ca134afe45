//! Window planner.
//!
//! Cuts `[start, end)` into fixed-width windows. The cursor starts at
//! `start` and advances by `width` until it reaches or passes `end`, so the
//! last window keeps the full width and may reach past `end`.

use bfore_core::TimeWindow;
use chrono::{Duration, NaiveDateTime};

use crate::error::PlanError;

/// Upper bound on the up-front allocation for a plan.
const PLAN_CAPACITY_HINT: usize = 4096;

/// Plans the windows covering `[start, end)`.
///
/// Returns an empty plan when `end <= start`.
///
/// # Errors
///
/// Returns [`PlanError::NonPositiveWidth`] if `width` is zero or negative,
/// and [`PlanError::WidthOutOfRange`] if a window would end past the
/// representable date range.
pub fn plan(
    start: NaiveDateTime,
    end: NaiveDateTime,
    width: Duration,
) -> Result<Vec<TimeWindow>, PlanError> {
    check_width(width)?;

    let mut windows = Vec::with_capacity(count(start, end, width).min(PLAN_CAPACITY_HINT));
    let mut cursor = start;
    while cursor < end {
        let next = cursor
            .checked_add_signed(width)
            .ok_or(PlanError::WidthOutOfRange(width.num_seconds()))?;
        // width > 0, so cursor < next always holds
        if let Ok(window) = TimeWindow::new(cursor, next) {
            windows.push(window);
        }
        cursor = next;
    }
    Ok(windows)
}

/// Number of windows [`plan`] would return, without building them.
///
/// # Errors
///
/// Returns [`PlanError::NonPositiveWidth`] if `width` is zero or negative.
pub fn window_count(
    start: NaiveDateTime,
    end: NaiveDateTime,
    width: Duration,
) -> Result<usize, PlanError> {
    check_width(width)?;
    Ok(count(start, end, width))
}

fn check_width(width: Duration) -> Result<(), PlanError> {
    if width <= Duration::zero() {
        return Err(PlanError::NonPositiveWidth(width.num_seconds()));
    }
    Ok(())
}

fn count(start: NaiveDateTime, end: NaiveDateTime, width: Duration) -> usize {
    if end <= start {
        return 0;
    }
    let span = (end - start).num_milliseconds();
    let step = width.num_milliseconds().max(1);
    let windows = span / step + i64::from(span % step != 0);
    usize::try_from(windows).unwrap_or(usize::MAX)
}

// ============================================================================
// Tests
// ============================================================================
