//! Per-day attendance classification.
//!
//! Combines the day's badge punches with the actual absence hours and the
//! policy thresholds into a status verdict and the numeric metrics carried
//! on the attendance record. Classification is total: every input yields a
//! verdict, and the same inputs always yield the same verdict.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::AttendancePolicy;
use crate::models::AttendanceStatus;

/// The badge punches of one employee on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPunches {
    /// The earliest event of the day, if any.
    pub first_in: Option<NaiveDateTime>,
    /// The latest event of the day, if any.
    pub last_out: Option<NaiveDateTime>,
    /// The total number of events.
    pub count: usize,
}

impl DayPunches {
    /// Builds the punch summary from the day's event timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::reconcile::DayPunches;
    ///
    /// let punches = DayPunches::from_timestamps(&[]);
    /// assert_eq!(punches.count, 0);
    /// assert!(punches.first_in.is_none());
    /// ```
    pub fn from_timestamps(timestamps: &[NaiveDateTime]) -> Self {
        Self {
            first_in: timestamps.iter().min().copied(),
            last_out: timestamps.iter().max().copied(),
            count: timestamps.len(),
        }
    }
}

/// The classification of one employee-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClassification {
    /// The worked span (last out minus first in) in hours, zero without
    /// events. Seconds are kept; rounding happens on the emitted record.
    pub worked_hours: Decimal,
    /// The attendance threshold after subtracting actual absence hours,
    /// clamped at zero.
    pub required_hours: Decimal,
    /// The status verdict.
    pub status: AttendanceStatus,
    /// Unaccounted shortfall of the day in whole minutes, clamped at zero.
    pub actual_absence_minutes: i64,
}

/// Classifies one employee-day.
///
/// The status rules apply in order:
///
/// 1. no events and a positive requirement → no-punch
/// 2. exactly one event and a short worked span → single-punch-missing
/// 3. a short worked span → insufficient-attendance
/// 4. otherwise → normal
///
/// A day with no events whose requirement is fully absorbed by absence
/// (required hours of zero) falls through to rule 4 and is classified
/// normal: the day counts as fully excused.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::models::AttendanceStatus;
/// use attendance_engine::reconcile::{DayPunches, classify_day};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// let verdict = classify_day(&DayPunches::default(), Decimal::ZERO, loader.policy());
/// assert_eq!(verdict.status, AttendanceStatus::NoPunch);
/// assert_eq!(verdict.required_hours, Decimal::new(875, 2));
/// ```
pub fn classify_day(
    punches: &DayPunches,
    actual_absence_hours: Decimal,
    policy: &AttendancePolicy,
) -> DayClassification {
    let worked_hours = match (punches.first_in, punches.last_out) {
        (Some(first_in), Some(last_out)) => {
            let seconds = (last_out - first_in).num_seconds();
            Decimal::new(seconds, 0) / Decimal::new(3600, 0)
        }
        _ => Decimal::ZERO,
    };

    let required_hours =
        (policy.thresholds.required_daily_hours - actual_absence_hours).max(Decimal::ZERO);

    let status = if punches.count == 0 && required_hours > Decimal::ZERO {
        AttendanceStatus::NoPunch
    } else if punches.count == 1 && worked_hours < required_hours {
        AttendanceStatus::SinglePunchMissing
    } else if worked_hours < required_hours {
        AttendanceStatus::InsufficientAttendance
    } else {
        AttendanceStatus::Normal
    };

    let span = policy.schedule.workday_span_hours();
    let shortfall = ((span - actual_absence_hours - worked_hours) * Decimal::new(60, 0))
        .round()
        .to_i64()
        .unwrap_or(0)
        .max(0);

    DayClassification {
        worked_hours,
        required_hours,
        status,
        actual_absence_minutes: shortfall,
    }
}
