//! Lunch-break adjustment of the absence timeline.
//!
//! The lunch break is unpaid time. To keep an absence that spans lunch
//! from counting the break twice, the adjuster inserts a synthetic lunch
//! interval into the merged timeline, re-merges, and then removes the
//! interval that is exactly the lunch break, meaning no absence touched
//! it and the break contributed nothing.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;

use super::interval::{TimeInterval, merge_intervals, total_minutes};

/// Computes the actual absence hours after lunch exclusion.
///
/// Takes the merged absence timeline of one employee-day, inserts the
/// configured lunch interval on the target date, re-merges, drops a
/// resulting interval that equals the lunch interval exactly, and sums the
/// rest in whole minutes, capped at the policy cap.
///
/// With no absence intervals at all the result is zero, regardless of the
/// lunch window.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::reconcile::actual_absence_hours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
/// assert_eq!(actual_absence_hours(&[], date, loader.policy()), Decimal::ZERO);
/// ```
pub fn actual_absence_hours(
    merged: &[TimeInterval],
    date: NaiveDate,
    policy: &AttendancePolicy,
) -> Decimal {
    if merged.is_empty() {
        return Decimal::ZERO;
    }

    let (lunch_start, lunch_end) = policy.schedule.lunch_window(date);
    let lunch = TimeInterval::new(lunch_start, lunch_end);

    let mut intervals = merged.to_vec();
    intervals.push(lunch);

    let adjusted: Vec<TimeInterval> = merge_intervals(intervals)
        .into_iter()
        .filter(|interval| *interval != lunch)
        .collect();

    let hours = Decimal::new(total_minutes(&adjusted), 0) / Decimal::new(60, 0);
    hours.min(policy.thresholds.absence_cap_hours)
}
