//! Request types for the Attendance Reconciliation Engine API.
//!
//! This module defines the JSON request structures for the `/reconcile`
//! endpoint: the four tabular inputs, the supplemental-card table, and
//! the calendar, each a list of named-column rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    AbsenceCategory, AbsenceRecord, AbsenceStatus, BadgeEvent, CalendarDayType, CalendarEntry,
    Employee, EmploymentType, SupplementalCardUsage,
};
use crate::reconcile::ReconcileInput;

/// Request body for the `/reconcile` endpoint.
///
/// Contains the materialized source tables for one reconciliation run.
/// The event, absence, and roster tables are mandatory; a missing table
/// rejects the request rather than fabricating defaults. Only the
/// supplemental-card and calendar tables are optional; omitting them
/// means "no supplemental-card usage anywhere" and "pure weekday rule".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The raw badge-event table.
    pub events: Vec<EventRequest>,
    /// The leave table.
    pub leave: Vec<AbsenceRowRequest>,
    /// The out-of-office table.
    pub out_of_office: Vec<AbsenceRowRequest>,
    /// The business-travel table.
    pub business_travel: Vec<AbsenceRowRequest>,
    /// The employee roster.
    pub roster: Vec<EmployeeRequest>,
    /// The supplemental-card usage table.
    #[serde(default)]
    pub supplemental_cards: Vec<SupplementalCardRequest>,
    /// The calendar table.
    #[serde(default)]
    pub calendar: Vec<CalendarRowRequest>,
}

/// A badge event in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    /// The name of the cardholder.
    pub employee: String,
    /// The timestamp of the swipe.
    pub timestamp: NaiveDateTime,
}

/// An absence-table row in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRowRequest {
    /// The name of the absent employee.
    pub employee: String,
    /// The absence category label.
    pub category: AbsenceCategory,
    /// The approval status label.
    pub status: AbsenceStatus,
    /// The unparsed start expression.
    pub start_expr: String,
    /// The unparsed end expression.
    pub end_expr: String,
}

/// A roster row in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee's name.
    pub name: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The employee-type label.
    pub employment_type: EmploymentType,
    /// The work-location label.
    pub work_location: String,
    /// The free-text grade label.
    pub grade_label: String,
}

/// A supplemental-card row in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementalCardRequest {
    /// The name of the employee the card was issued to.
    pub employee: String,
    /// The date the card was used.
    pub date: NaiveDate,
}

/// A calendar row in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRowRequest {
    /// The date expression.
    pub date: String,
    /// The date-type label.
    pub day_type: CalendarDayType,
}

impl From<EventRequest> for BadgeEvent {
    fn from(req: EventRequest) -> Self {
        BadgeEvent {
            employee: req.employee,
            timestamp: req.timestamp,
        }
    }
}

impl From<AbsenceRowRequest> for AbsenceRecord {
    fn from(req: AbsenceRowRequest) -> Self {
        AbsenceRecord {
            employee: req.employee,
            category: req.category,
            status: req.status,
            start_expr: req.start_expr,
            end_expr: req.end_expr,
        }
    }
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            name: req.name,
            department: req.department,
            employment_type: req.employment_type,
            work_location: req.work_location,
            grade_label: req.grade_label,
        }
    }
}

impl From<SupplementalCardRequest> for SupplementalCardUsage {
    fn from(req: SupplementalCardRequest) -> Self {
        SupplementalCardUsage {
            employee: req.employee,
            date: req.date,
        }
    }
}

impl From<CalendarRowRequest> for CalendarEntry {
    fn from(req: CalendarRowRequest) -> Self {
        CalendarEntry {
            date: req.date,
            day_type: req.day_type,
        }
    }
}

impl From<ReconcileRequest> for ReconcileInput {
    fn from(req: ReconcileRequest) -> Self {
        ReconcileInput {
            events: req.events.into_iter().map(Into::into).collect(),
            leave: req.leave.into_iter().map(Into::into).collect(),
            out_of_office: req.out_of_office.into_iter().map(Into::into).collect(),
            business_travel: req.business_travel.into_iter().map(Into::into).collect(),
            roster: req.roster.into_iter().map(Into::into).collect(),
            supplemental_cards: req.supplemental_cards.into_iter().map(Into::into).collect(),
            calendar: req.calendar.into_iter().map(Into::into).collect(),
        }
    }
}
