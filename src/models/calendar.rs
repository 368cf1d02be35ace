//! Workday calendar models and the calendar policy.
//!
//! This module defines the raw calendar rows consumed from the calendar
//! table and the [`WorkdayCalendar`] that answers the workday/holiday
//! question for the reconciliation engine.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ReconcileWarning;

/// The date-type label carried by a calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarDayType {
    /// A statutory holiday; attendance is never required.
    LegalHoliday,
    /// A nominally non-working date mandated as a workday to offset an
    /// extended holiday elsewhere.
    CompensatedWorkday,
    /// An ordinary weekend rest day; carries no override either way.
    WeekendRest,
    /// An ordinary workday, listed explicitly.
    Workday,
    /// Any unrecognised date-type label.
    #[serde(other)]
    Unknown,
}

/// A raw calendar row.
///
/// The date is kept as text so a malformed date degrades to a skipped row
/// with a diagnostic instead of failing the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// The date expression (e.g., "2025-05-01", optionally with a trailing
    /// time portion that is ignored).
    pub date: String,
    /// The date-type label.
    pub day_type: CalendarDayType,
}

/// The calendar policy: an explicit override set plus the weekday default.
///
/// No calendar data is a valid, if degraded, state: with both sets empty
/// the policy reduces to the pure Monday–Friday rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkdayCalendar {
    /// Dates that are statutory holidays.
    holidays: HashSet<NaiveDate>,
    /// Dates mandated as workdays (compensated workdays and explicitly
    /// listed ordinary workdays).
    workday_overrides: HashSet<NaiveDate>,
}

impl WorkdayCalendar {
    /// Builds a calendar from raw rows, skipping malformed ones.
    ///
    /// Rows with an unparseable date or an unrecognised date-type label are
    /// skipped with a diagnostic; they never fail the build. Weekend-rest
    /// rows are acknowledged and ignored; they carry no override.
    pub fn from_entries(entries: &[CalendarEntry]) -> (Self, Vec<ReconcileWarning>) {
        let mut calendar = WorkdayCalendar::default();
        let mut warnings = Vec::new();

        for entry in entries {
            // A trailing time portion on the date cell is tolerated.
            let date_text = entry.date.split_whitespace().next().unwrap_or("");
            let date = match NaiveDate::parse_from_str(date_text, "%Y-%m-%d") {
                Ok(date) => date,
                Err(err) => {
                    warn!(date = %entry.date, error = %err, "Skipping calendar row with bad date");
                    warnings.push(ReconcileWarning::new(
                        "calendar_bad_date",
                        format!("calendar row with unparseable date '{}' skipped", entry.date),
                    ));
                    continue;
                }
            };

            match entry.day_type {
                CalendarDayType::LegalHoliday => {
                    calendar.holidays.insert(date);
                }
                CalendarDayType::CompensatedWorkday | CalendarDayType::Workday => {
                    calendar.workday_overrides.insert(date);
                }
                CalendarDayType::WeekendRest => {}
                CalendarDayType::Unknown => {
                    warn!(date = %entry.date, "Skipping calendar row with unknown day type");
                    warnings.push(ReconcileWarning::new(
                        "calendar_unknown_day_type",
                        format!("calendar row for '{}' has an unrecognised day type", entry.date),
                    ));
                }
            }
        }

        (calendar, warnings)
    }

    /// Classifies a date as workday or not.
    ///
    /// The holiday set wins over the override set; outside both sets the
    /// Monday–Friday default applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::WorkdayCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = WorkdayCalendar::default();
    /// // 2025-04-28 is a Monday, 2025-05-03 a Saturday.
    /// assert!(calendar.is_workday(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap()));
    /// assert!(!calendar.is_workday(NaiveDate::from_ymd_opt(2025, 5, 3).unwrap()));
    /// ```
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        if self.holidays.contains(&date) {
            return false;
        }
        if self.workday_overrides.contains(&date) {
            return true;
        }
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}
