//! Absence record models.
//!
//! This module defines the raw absence record shared by the three absence
//! source tables (leave, out-of-office, business travel). Records carry
//! their start/end expressions unparsed; interpretation happens per queried
//! day inside the absence resolver.

use serde::{Deserialize, Serialize};

/// The category of an absence record.
///
/// The three absence source tables are structurally identical; the
/// category distinguishes them and labels the per-day absence description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceCategory {
    /// A leave request (vacation, sick leave, etc.).
    Leave,
    /// An out-of-office request within the working day.
    OutOfOffice,
    /// A business-travel request.
    BusinessTravel,
}

impl std::fmt::Display for AbsenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsenceCategory::Leave => write!(f, "leave"),
            AbsenceCategory::OutOfOffice => write!(f, "out-of-office"),
            AbsenceCategory::BusinessTravel => write!(f, "business-travel"),
        }
    }
}

/// The approval status of an absence record.
///
/// Only effective and pending-effective records count toward absence time;
/// every other status label (withdrawn, rejected, ...) deserializes to
/// [`AbsenceStatus::Other`] and is ignored by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceStatus {
    /// The request has taken effect.
    Effective,
    /// The request is approved but has not yet taken effect.
    PendingEffective,
    /// Any other status label.
    #[serde(other)]
    Other,
}

impl AbsenceStatus {
    /// Returns true if records with this status count toward absence time.
    pub fn is_counted(&self) -> bool {
        matches!(self, AbsenceStatus::Effective | AbsenceStatus::PendingEffective)
    }
}

/// A raw absence record from one of the three source tables.
///
/// The start and end fields hold the unparsed time expressions exactly as
/// they appear in the source table; see the time-expression parser for the
/// four accepted forms. A record spanning several days is evaluated
/// independently for each day it is queried against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// The name of the absent employee.
    pub employee: String,
    /// The absence category.
    pub category: AbsenceCategory,
    /// The approval status.
    pub status: AbsenceStatus,
    /// The unparsed start expression (e.g., "2025-04-28 morning").
    pub start_expr: String,
    /// The unparsed end expression (e.g., "2025-04-29 15:30").
    pub end_expr: String,
}
