//! Configuration for the Attendance Reconciliation Engine.
//!
//! This module provides loading and access to the attendance policy:
//! the workday and lunch windows, the attendance thresholds, and the
//! roster qualification rules.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendancePolicy, DaySchedule, QualificationRules, Thresholds};
