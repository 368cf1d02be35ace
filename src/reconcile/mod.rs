//! Reconciliation logic for the Attendance Reconciliation Engine.
//!
//! This module contains the core algorithms: interval merging,
//! time-expression parsing, absence resolution, lunch adjustment,
//! attendance classification, roster qualification, and the engine that
//! orchestrates them across the employee roster and date range.

mod absence_resolver;
mod classifier;
mod engine;
mod interval;
mod lunch_adjustment;
mod qualify;
mod time_expr;

pub use absence_resolver::{ResolvedAbsence, resolve_absence};
pub use classifier::{DayClassification, DayPunches, classify_day};
pub use engine::{ReconcileInput, reconcile};
pub use interval::{TimeInterval, merge_intervals, total_minutes};
pub use lunch_adjustment::actual_absence_hours;
pub use qualify::{parse_grade_level, qualified_employees};
pub use time_expr::parse_time_expr;
