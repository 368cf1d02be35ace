//! Reconciliation output models.
//!
//! This module contains the per-day [`AttendanceRecord`], the derived
//! [`ExceptionSummary`], and the [`ReconcileOutcome`] envelope returned by
//! the reconciliation engine.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The classification verdict for one employee-day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status = AttendanceStatus::NoPunch;
/// assert!(status.is_exception());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Attendance requirement met (or fully excused).
    Normal,
    /// No badge events on a day that still required attendance.
    NoPunch,
    /// Exactly one badge event and the worked span fell short.
    SinglePunchMissing,
    /// Multiple badge events but the worked span fell short.
    InsufficientAttendance,
}

impl AttendanceStatus {
    /// Returns true if this status counts toward the exception summary.
    pub fn is_exception(&self) -> bool {
        !matches!(self, AttendanceStatus::Normal)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Normal => write!(f, "normal"),
            AttendanceStatus::NoPunch => write!(f, "no-punch"),
            AttendanceStatus::SinglePunchMissing => write!(f, "single-punch-missing"),
            AttendanceStatus::InsufficientAttendance => write!(f, "insufficient-attendance"),
        }
    }
}

/// One classified employee-day.
///
/// Created once per (employee, workday) pair during reconciliation and
/// immutable afterwards. Hour fields are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The workday this record covers.
    pub date: NaiveDate,
    /// The employee's name.
    pub employee: String,
    /// The employee's department, copied from the roster.
    pub department: String,
    /// Timestamp of the first badge event of the day, if any.
    pub first_in: Option<NaiveDateTime>,
    /// Timestamp of the last badge event of the day, if any.
    pub last_out: Option<NaiveDateTime>,
    /// The worked span (last out minus first in) in hours.
    pub worked_hours: Decimal,
    /// Merged absence duration before lunch exclusion, capped.
    pub raw_absence_hours: Decimal,
    /// The configured lunch-break span in hours.
    pub lunch_hours: Decimal,
    /// Absence duration after lunch exclusion, capped.
    pub actual_absence_hours: Decimal,
    /// Unaccounted shortfall of the day in whole minutes, clamped at zero.
    pub actual_absence_minutes: i64,
    /// The attendance threshold after subtracting actual absence hours.
    pub required_hours: Decimal,
    /// The classification verdict.
    pub status: AttendanceStatus,
    /// Human-readable description of the day's absences, empty if none.
    pub absence_note: String,
    /// Whether a supplemental card was used on this day.
    pub supplemental_card: bool,
}

/// Per-employee exception counts across the reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionEntry {
    /// The employee's name.
    pub employee: String,
    /// Number of no-punch days.
    pub no_punch: u32,
    /// Number of single-punch-missing days.
    pub single_punch_missing: u32,
    /// Number of insufficient-attendance days.
    pub insufficient_attendance: u32,
    /// Sum of the three counts.
    pub total: u32,
}

/// The cross-range exception summary, ordered by descending total.
///
/// Derived from the attendance records, never stored independently; it is
/// recomputed wholesale whenever the record set changes. Employees without
/// any exception do not appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionSummary {
    /// Summary rows, highest total first; ties keep first-seen order.
    pub entries: Vec<ExceptionEntry>,
}

impl ExceptionSummary {
    /// Derives the summary from a set of attendance records.
    ///
    /// Counts each exception status per employee, totals them, and orders
    /// the rows by descending total. The sort is stable, so employees with
    /// equal totals keep the order their first exception appeared in.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::ExceptionSummary;
    ///
    /// let summary = ExceptionSummary::from_records(&[]);
    /// assert!(summary.entries.is_empty());
    /// ```
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<ExceptionEntry> = Vec::new();

        for record in records {
            if !record.status.is_exception() {
                continue;
            }
            let slot = *index.entry(record.employee.as_str()).or_insert_with(|| {
                entries.push(ExceptionEntry {
                    employee: record.employee.clone(),
                    no_punch: 0,
                    single_punch_missing: 0,
                    insufficient_attendance: 0,
                    total: 0,
                });
                entries.len() - 1
            });

            let entry = &mut entries[slot];
            match record.status {
                AttendanceStatus::NoPunch => entry.no_punch += 1,
                AttendanceStatus::SinglePunchMissing => entry.single_punch_missing += 1,
                AttendanceStatus::InsufficientAttendance => entry.insufficient_attendance += 1,
                AttendanceStatus::Normal => unreachable!("filtered above"),
            }
            entry.total += 1;
        }

        entries.sort_by_key(|entry| std::cmp::Reverse(entry.total));
        Self { entries }
    }
}

/// A recovered, non-fatal problem encountered during a run.
///
/// Warnings are the structured counterpart of the engine's `tracing`
/// diagnostics: one per skipped row, carried on the outcome so callers
/// without a log subscriber still see what was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileWarning {
    /// A code identifying the kind of problem.
    pub code: String,
    /// A human-readable description.
    pub message: String,
}

impl ReconcileWarning {
    /// Creates a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The effective reporting period of a run, derived from the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// The earliest event date (inclusive).
    pub start_date: NaiveDate,
    /// The latest event date (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingPeriod {
    /// Checks if a given date falls within this period, inclusive.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::ReportingPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = ReportingPeriod {
    ///     start_date: NaiveDate::from_ymd_opt(2025, 4, 28).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
    /// };
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 29).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// The complete output of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Unique identifier of this run.
    pub run_id: Uuid,
    /// When the run completed.
    pub generated_at: DateTime<Utc>,
    /// The engine crate version that produced the output.
    pub engine_version: String,
    /// The effective reporting period.
    pub period: ReportingPeriod,
    /// One record per qualified employee per workday, in date-major order.
    pub records: Vec<AttendanceRecord>,
    /// The derived exception summary.
    pub summary: ExceptionSummary,
    /// Non-fatal problems recovered during the run.
    pub warnings: Vec<ReconcileWarning>,
    /// The run duration in microseconds.
    pub duration_us: u64,
}
