//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from the YAML policy file. The policy makes the windows
//! and thresholds that the original compliance rules hardcoded explicit,
//! so they can change without touching the algorithms.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::EmploymentType;

/// The shape of a working day: the attendance window and the lunch break.
#[derive(Debug, Clone, Deserialize)]
pub struct DaySchedule {
    /// Start of the attendance window (default interpretation of a bare
    /// start date on an absence record).
    pub workday_start: NaiveTime,
    /// End of the attendance window.
    pub workday_end: NaiveTime,
    /// Start of the unpaid lunch break.
    pub lunch_start: NaiveTime,
    /// End of the unpaid lunch break.
    pub lunch_end: NaiveTime,
    /// End of the morning half-day (the "morning" marker as an end time).
    pub morning_end: NaiveTime,
    /// Start of the afternoon half-day (the "afternoon" marker as a start time).
    pub afternoon_start: NaiveTime,
}

impl DaySchedule {
    /// Returns the attendance window anchored on a calendar date.
    pub fn workday_window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.workday_start), date.and_time(self.workday_end))
    }

    /// Returns the lunch window anchored on a calendar date.
    pub fn lunch_window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.lunch_start), date.and_time(self.lunch_end))
    }

    /// The full attendance window span in hours.
    pub fn workday_span_hours(&self) -> Decimal {
        let minutes = (self.workday_end - self.workday_start).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// The lunch-break span in hours.
    pub fn lunch_hours(&self) -> Decimal {
        let minutes = (self.lunch_end - self.lunch_start).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }
}

/// The attendance thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    /// Nominal required attendance on a day without any absence.
    pub required_daily_hours: Decimal,
    /// Cap on raw and actual absence hours (a full workday).
    pub absence_cap_hours: Decimal,
}

/// The roster qualification rules.
///
/// Only employees matching all three rules are reconciled.
#[derive(Debug, Clone, Deserialize)]
pub struct QualificationRules {
    /// The required employment type.
    pub employment_type: EmploymentType,
    /// The required work-location label, compared exactly.
    pub work_location: String,
    /// Exclusive ceiling on the numeric grade level; grade labels without
    /// an extractable number never qualify.
    pub grade_ceiling: u32,
}

/// The complete attendance policy loaded from the YAML policy file.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePolicy {
    /// The day schedule (windows).
    pub schedule: DaySchedule,
    /// The attendance thresholds.
    pub thresholds: Thresholds,
    /// The roster qualification rules.
    pub qualification: QualificationRules,
}

impl AttendancePolicy {
    /// Validates the internal consistency of the policy.
    ///
    /// The windows must be properly ordered, the lunch break must fall
    /// inside the attendance window, and the thresholds must be positive
    /// with the required hours not exceeding the cap.
    pub fn validate(&self) -> EngineResult<()> {
        let s = &self.schedule;
        if s.workday_start >= s.workday_end {
            return Err(EngineError::InvalidPolicy {
                message: "workday_start must be earlier than workday_end".to_string(),
            });
        }
        if s.lunch_start >= s.lunch_end {
            return Err(EngineError::InvalidPolicy {
                message: "lunch_start must be earlier than lunch_end".to_string(),
            });
        }
        if s.lunch_start < s.workday_start || s.lunch_end > s.workday_end {
            return Err(EngineError::InvalidPolicy {
                message: "lunch window must fall inside the workday window".to_string(),
            });
        }
        if s.morning_end < s.workday_start || s.morning_end > s.workday_end {
            return Err(EngineError::InvalidPolicy {
                message: "morning_end must fall inside the workday window".to_string(),
            });
        }
        if s.afternoon_start < s.workday_start || s.afternoon_start > s.workday_end {
            return Err(EngineError::InvalidPolicy {
                message: "afternoon_start must fall inside the workday window".to_string(),
            });
        }
        if self.thresholds.required_daily_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                message: "required_daily_hours must be positive".to_string(),
            });
        }
        if self.thresholds.absence_cap_hours < self.thresholds.required_daily_hours {
            return Err(EngineError::InvalidPolicy {
                message: "absence_cap_hours must not be below required_daily_hours".to_string(),
            });
        }
        Ok(())
    }
}
