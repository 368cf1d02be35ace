//! Time-interval merging primitives.
//!
//! This module provides the [`TimeInterval`] value type and the generic
//! merge-and-measure operations the absence calculations are built on.
//! Both operations are pure and deterministic; input order never affects
//! the output.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A span of time within a single day, conceptually half-open.
///
/// Invariant: `start <= end`. The resolver only constructs intervals after
/// clipping, which discards inverted spans.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::TimeInterval;
/// use chrono::NaiveDateTime;
///
/// let interval = TimeInterval {
///     start: NaiveDateTime::parse_from_str("2025-04-28 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2025-04-28 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(interval.duration_minutes(), 180);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// The start of the span.
    pub start: NaiveDateTime,
    /// The end of the span.
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates a new interval.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The duration of this interval in whole minutes.
    ///
    /// Fractional seconds truncate toward zero.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Merges overlapping or touching intervals into a minimal disjoint set.
///
/// Sorts by start ascending, then folds each interval into its predecessor
/// whenever its start does not lie strictly after the predecessor's end;
/// touching counts as overlapping. The output is start-ordered and
/// pairwise disjoint, and merging is idempotent.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::{TimeInterval, merge_intervals};
/// use chrono::NaiveDateTime;
///
/// fn dt(s: &str) -> NaiveDateTime {
///     NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
/// }
///
/// let merged = merge_intervals(vec![
///     TimeInterval::new(dt("2025-04-28 13:00:00"), dt("2025-04-28 15:00:00")),
///     TimeInterval::new(dt("2025-04-28 09:00:00"), dt("2025-04-28 11:00:00")),
///     TimeInterval::new(dt("2025-04-28 11:00:00"), dt("2025-04-28 12:00:00")),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0], TimeInterval::new(dt("2025-04-28 09:00:00"), dt("2025-04-28 12:00:00")));
/// ```
pub fn merge_intervals(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|interval| interval.start);

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }

    merged
}

/// Sums the durations of a set of intervals in whole minutes.
pub fn total_minutes(intervals: &[TimeInterval]) -> i64 {
    intervals.iter().map(TimeInterval::duration_minutes).sum()
}
