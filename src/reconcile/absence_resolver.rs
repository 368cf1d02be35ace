//! Per-day absence resolution.
//!
//! For one employee and one calendar date, the resolver scans the three
//! absence sources in a single generic pass, clips each counted record to
//! the workday window, and produces the merged absence timeline, the
//! capped raw absence hours, and a human-readable description of the
//! surviving records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::AttendancePolicy;
use crate::models::{AbsenceRecord, ReconcileWarning};

use super::interval::{TimeInterval, merge_intervals, total_minutes};
use super::time_expr::parse_time_expr;

/// The result of resolving one employee-day against the absence sources.
#[derive(Debug, Clone)]
pub struct ResolvedAbsence {
    /// Merged absence duration in hours, capped at the policy cap.
    pub raw_hours: Decimal,
    /// The merged, disjoint absence timeline (pre-cap).
    pub merged: Vec<TimeInterval>,
    /// Per-record descriptions joined with `"; "`, in source order.
    pub description: String,
    /// One warning per record skipped over an unparseable expression.
    pub warnings: Vec<ReconcileWarning>,
}

/// Resolves all absence sources for one employee on one date.
///
/// For each source independently, records are filtered to the employee and
/// to counted statuses, parsed, rejected when their date span misses the
/// target day, and clipped to the workday window; empty or inverted clips
/// are discarded. Surviving intervals from all sources are merged together
/// and summed in whole minutes. A record with an unparseable start or end
/// degrades to a skipped record with a diagnostic, never a failed run.
///
/// A multi-day record is evaluated independently for every day it is
/// queried against; no cross-day state is kept.
pub fn resolve_absence(
    employee: &str,
    date: NaiveDate,
    sources: &[&[AbsenceRecord]],
    policy: &AttendancePolicy,
) -> ResolvedAbsence {
    let (window_start, window_end) = policy.schedule.workday_window(date);

    let mut clipped: Vec<TimeInterval> = Vec::new();
    let mut descriptions: Vec<String> = Vec::new();
    let mut warnings: Vec<ReconcileWarning> = Vec::new();

    for source in sources {
        for record in source
            .iter()
            .filter(|r| r.employee == employee && r.status.is_counted())
        {
            let parsed = parse_time_expr(&record.start_expr, false, &policy.schedule).and_then(
                |start| {
                    parse_time_expr(&record.end_expr, true, &policy.schedule)
                        .map(|end| (start, end))
                },
            );
            let (start, end) = match parsed {
                Ok(span) => span,
                Err(err) => {
                    warn!(employee, %date, error = %err, "Skipping absence record");
                    warnings.push(ReconcileWarning::new(
                        "absence_bad_time_expr",
                        format!("{} record for '{}' skipped: {}", record.category, employee, err),
                    ));
                    continue;
                }
            };

            // The record does not touch the target day at all.
            if end.date() < date || start.date() > date {
                continue;
            }

            let clip_start = start.max(window_start);
            let clip_end = end.min(window_end);
            if clip_start >= clip_end {
                continue;
            }

            descriptions.push(format!(
                "{}[{}-{}]",
                record.category,
                clip_start.format("%H:%M"),
                clip_end.format("%H:%M"),
            ));
            clipped.push(TimeInterval::new(clip_start, clip_end));
        }
    }

    let merged = merge_intervals(clipped);
    let hours = Decimal::new(total_minutes(&merged), 0) / Decimal::new(60, 0);

    ResolvedAbsence {
        raw_hours: hours.min(policy.thresholds.absence_cap_hours),
        merged,
        description: descriptions.join("; "),
        warnings,
    }
}
