//! Core data models for the Attendance Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod attendance_record;
mod calendar;
mod employee;
mod event;

pub use absence::{AbsenceCategory, AbsenceRecord, AbsenceStatus};
pub use attendance_record::{
    AttendanceRecord, AttendanceStatus, ExceptionEntry, ExceptionSummary, ReconcileOutcome,
    ReconcileWarning, ReportingPeriod,
};
pub use calendar::{CalendarDayType, CalendarEntry, WorkdayCalendar};
pub use employee::{Employee, EmploymentType};
pub use event::{BadgeEvent, SupplementalCardUsage};
