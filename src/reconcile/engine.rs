//! The reconciliation engine.
//!
//! Orchestrates the calendar policy, the absence resolver, the lunch
//! adjustment, and the classifier across the qualified roster and the
//! reporting period, emitting one attendance record per employee-day and
//! the derived exception summary.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::AttendancePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceRecord, AttendanceRecord, BadgeEvent, CalendarEntry, Employee, ExceptionSummary,
    ReconcileOutcome, ReportingPeriod, SupplementalCardUsage, WorkdayCalendar,
};

use super::absence_resolver::resolve_absence;
use super::classifier::{DayPunches, classify_day};
use super::lunch_adjustment::actual_absence_hours;
use super::qualify::qualified_employees;

/// The materialized source tables of one reconciliation run.
///
/// The engine performs no I/O; the caller loads these tables however it
/// likes and hands them over as plain values. The supplemental-card and
/// calendar tables may be empty; both degrade gracefully.
#[derive(Debug, Clone, Default)]
pub struct ReconcileInput {
    /// The raw badge-event table. Must not be empty.
    pub events: Vec<BadgeEvent>,
    /// The leave table.
    pub leave: Vec<AbsenceRecord>,
    /// The out-of-office table.
    pub out_of_office: Vec<AbsenceRecord>,
    /// The business-travel table.
    pub business_travel: Vec<AbsenceRecord>,
    /// The employee roster.
    pub roster: Vec<Employee>,
    /// The supplemental-card usage table.
    pub supplemental_cards: Vec<SupplementalCardUsage>,
    /// The raw calendar table.
    pub calendar: Vec<CalendarEntry>,
}

/// Runs one full reconciliation.
///
/// The reporting period is the inclusive span from the earliest to the
/// latest badge-event date. Every date in that span that the calendar
/// classifies as a workday is reconciled for every qualified employee:
/// the day's punches, the resolved and lunch-adjusted absence hours, and
/// the classification verdict combine into one [`AttendanceRecord`].
/// Records are emitted in date-major, roster-minor order.
///
/// Record-level problems (unparseable absence expressions, malformed
/// calendar rows) degrade to skipped rows with warnings. An empty event
/// table is fatal: without it no reporting period exists.
///
/// Re-running with identical inputs yields identical record and summary
/// sets; only the run metadata (id, timestamp, duration) differs.
pub fn reconcile(
    input: &ReconcileInput,
    policy: &AttendancePolicy,
) -> EngineResult<ReconcileOutcome> {
    let started = Instant::now();

    let (calendar, mut warnings) = WorkdayCalendar::from_entries(&input.calendar);

    let qualified = qualified_employees(&input.roster, &policy.qualification);
    info!(
        roster = input.roster.len(),
        qualified = qualified.len(),
        events = input.events.len(),
        "Starting reconciliation"
    );

    let period = derive_period(&input.events)?;

    // Punch timestamps per (employee, date).
    let mut punches: HashMap<(&str, NaiveDate), Vec<NaiveDateTime>> = HashMap::new();
    for event in &input.events {
        punches
            .entry((event.employee.as_str(), event.date()))
            .or_default()
            .push(event.timestamp);
    }

    let cards: HashSet<(&str, NaiveDate)> = input
        .supplemental_cards
        .iter()
        .map(|usage| (usage.employee.as_str(), usage.date))
        .collect();

    let sources: [&[AbsenceRecord]; 3] = [
        &input.leave,
        &input.out_of_office,
        &input.business_travel,
    ];

    let lunch_hours = policy.schedule.lunch_hours();
    let mut records: Vec<AttendanceRecord> = Vec::new();

    for date in period
        .start_date
        .iter_days()
        .take_while(|date| *date <= period.end_date)
    {
        if !calendar.is_workday(date) {
            continue;
        }

        for employee in &qualified {
            let day_punches = punches
                .get(&(employee.name.as_str(), date))
                .map(|timestamps| DayPunches::from_timestamps(timestamps))
                .unwrap_or_default();

            let resolved = resolve_absence(&employee.name, date, &sources, policy);
            warnings.extend(resolved.warnings);

            let actual = actual_absence_hours(&resolved.merged, date, policy);
            let verdict = classify_day(&day_punches, actual, policy);

            records.push(AttendanceRecord {
                date,
                employee: employee.name.clone(),
                department: employee.department.clone(),
                first_in: day_punches.first_in,
                last_out: day_punches.last_out,
                worked_hours: verdict.worked_hours.round_dp(2),
                raw_absence_hours: resolved.raw_hours.round_dp(2),
                lunch_hours,
                actual_absence_hours: actual.round_dp(2),
                actual_absence_minutes: verdict.actual_absence_minutes,
                required_hours: verdict.required_hours.round_dp(2),
                status: verdict.status,
                absence_note: resolved.description,
                supplemental_card: cards.contains(&(employee.name.as_str(), date)),
            });
        }
    }

    let summary = ExceptionSummary::from_records(&records);
    let duration_us = started.elapsed().as_micros() as u64;
    info!(
        records = records.len(),
        flagged = summary.entries.len(),
        warnings = warnings.len(),
        duration_us,
        "Reconciliation completed"
    );

    Ok(ReconcileOutcome {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        records,
        summary,
        warnings,
        duration_us,
    })
}

/// Derives the reporting period from the event table.
fn derive_period(events: &[BadgeEvent]) -> EngineResult<ReportingPeriod> {
    let dates = events.iter().map(BadgeEvent::date);
    match (dates.clone().min(), dates.max()) {
        (Some(start_date), Some(end_date)) => Ok(ReportingPeriod {
            start_date,
            end_date,
        }),
        _ => Err(EngineError::EmptyEventLog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{
        AbsenceCategory, AbsenceStatus, AttendanceStatus, CalendarDayType, EmploymentType,
    };
    use rust_decimal::Decimal;

    fn load_policy() -> AttendancePolicy {
        ConfigLoader::load("config/attendance")
            .expect("Failed to load policy")
            .policy()
            .clone()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(employee: &str, timestamp: &str) -> BadgeEvent {
        BadgeEvent {
            employee: employee.to_string(),
            timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    fn roster_entry(name: &str) -> Employee {
        Employee {
            name: name.to_string(),
            department: "Engineering".to_string(),
            employment_type: EmploymentType::FullTime,
            work_location: "Shanghai".to_string(),
            grade_label: "Grade 10".to_string(),
        }
    }

    fn leave(employee: &str, start: &str, end: &str) -> AbsenceRecord {
        AbsenceRecord {
            employee: employee.to_string(),
            category: AbsenceCategory::Leave,
            status: AbsenceStatus::Effective,
            start_expr: start.to_string(),
            end_expr: end.to_string(),
        }
    }

    fn find<'a>(outcome: &'a ReconcileOutcome, employee: &str, day: &str) -> &'a AttendanceRecord {
        outcome
            .records
            .iter()
            .find(|r| r.employee == employee && r.date == date(day))
            .expect("record missing")
    }

    #[test]
    fn test_empty_event_log_is_fatal() {
        let input = ReconcileInput {
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };
        let result = reconcile(&input, &load_policy());
        assert!(matches!(result, Err(EngineError::EmptyEventLog)));
    }

    #[test]
    fn test_no_events_no_absence_is_no_punch() {
        // 2025-04-28 is a Monday. Bob anchors the period; Alice has no
        // events and no absence records.
        let input = ReconcileInput {
            events: vec![
                event("Bob Li", "2025-04-28 09:00:00"),
                event("Bob Li", "2025-04-28 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen"), roster_entry("Bob Li")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let record = find(&outcome, "Alice Chen", "2025-04-28");
        assert_eq!(record.status, AttendanceStatus::NoPunch);
        assert_eq!(record.required_hours, Decimal::new(875, 2));
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert!(record.first_in.is_none());
        assert!(record.absence_note.is_empty());
    }

    #[test]
    fn test_full_day_leave_without_punches_is_normal() {
        let input = ReconcileInput {
            events: vec![
                event("Bob Li", "2025-04-28 09:00:00"),
                event("Bob Li", "2025-04-28 18:00:00"),
            ],
            leave: vec![leave("Alice Chen", "2025-04-28", "2025-04-28")],
            roster: vec![roster_entry("Alice Chen"), roster_entry("Bob Li")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let record = find(&outcome, "Alice Chen", "2025-04-28");
        assert_eq!(record.raw_absence_hours, Decimal::new(9, 0));
        assert_eq!(record.actual_absence_hours, Decimal::new(9, 0));
        assert_eq!(record.required_hours, Decimal::ZERO);
        assert_eq!(record.status, AttendanceStatus::Normal);
        assert_eq!(record.absence_note, "leave[09:00-18:00]");
    }

    #[test]
    fn test_weekend_days_are_skipped() {
        // Friday through Monday: the Saturday and Sunday produce no rows.
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-05-02 09:00:00"),
                event("Alice Chen", "2025-05-05 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let dates: Vec<NaiveDate> = outcome.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2025-05-02"), date("2025-05-05")]);
    }

    #[test]
    fn test_calendar_overrides_shape_the_period() {
        // 2025-05-01 (Thursday) is a legal holiday, 2025-04-27 (Sunday)
        // a compensated workday.
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-27 09:00:00"),
                event("Alice Chen", "2025-05-01 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen")],
            calendar: vec![
                CalendarEntry {
                    date: "2025-05-01".to_string(),
                    day_type: CalendarDayType::LegalHoliday,
                },
                CalendarEntry {
                    date: "2025-04-27".to_string(),
                    day_type: CalendarDayType::CompensatedWorkday,
                },
            ],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let dates: Vec<NaiveDate> = outcome.records.iter().map(|r| r.date).collect();
        assert!(dates.contains(&date("2025-04-27")));
        assert!(!dates.contains(&date("2025-05-01")));
    }

    #[test]
    fn test_unqualified_employees_produce_no_records() {
        let mut manager = roster_entry("Dan Zhou");
        manager.grade_label = "Grade 14".to_string();
        let input = ReconcileInput {
            events: vec![
                event("Dan Zhou", "2025-04-28 09:00:00"),
                event("Dan Zhou", "2025-04-28 18:00:00"),
            ],
            roster: vec![manager],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.summary.entries.is_empty());
    }

    #[test]
    fn test_worked_span_and_rounding() {
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-28 08:58:21"),
                event("Alice Chen", "2025-04-28 12:01:00"),
                event("Alice Chen", "2025-04-28 18:02:21"),
            ],
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let record = find(&outcome, "Alice Chen", "2025-04-28");
        // 08:58:21 to 18:02:21 is 9h04m, 9.07 rounded to two places.
        assert_eq!(record.worked_hours, Decimal::new(907, 2));
        assert_eq!(record.status, AttendanceStatus::Normal);
        assert_eq!(
            record.first_in,
            Some(NaiveDateTime::parse_from_str("2025-04-28 08:58:21", "%Y-%m-%d %H:%M:%S").unwrap())
        );
    }

    #[test]
    fn test_single_punch_is_flagged() {
        let input = ReconcileInput {
            events: vec![event("Alice Chen", "2025-04-28 09:00:00")],
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        let record = find(&outcome, "Alice Chen", "2025-04-28");
        assert_eq!(record.status, AttendanceStatus::SinglePunchMissing);
    }

    #[test]
    fn test_supplemental_card_is_flagged_on_exact_match() {
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-28 09:00:00"),
                event("Alice Chen", "2025-04-28 18:00:00"),
                event("Alice Chen", "2025-04-29 09:00:00"),
                event("Alice Chen", "2025-04-29 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen")],
            supplemental_cards: vec![SupplementalCardUsage {
                employee: "Alice Chen".to_string(),
                date: date("2025-04-28"),
            }],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        assert!(find(&outcome, "Alice Chen", "2025-04-28").supplemental_card);
        assert!(!find(&outcome, "Alice Chen", "2025-04-29").supplemental_card);
    }

    #[test]
    fn test_summary_aggregates_across_the_range() {
        // Alice misses both days, Bob only the first.
        let input = ReconcileInput {
            events: vec![
                event("Bob Li", "2025-04-28 09:00:00"),
                event("Bob Li", "2025-04-29 09:00:00"),
                event("Bob Li", "2025-04-29 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen"), roster_entry("Bob Li")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        assert_eq!(outcome.summary.entries.len(), 2);
        assert_eq!(outcome.summary.entries[0].employee, "Alice Chen");
        assert_eq!(outcome.summary.entries[0].no_punch, 2);
        assert_eq!(outcome.summary.entries[0].total, 2);
        assert_eq!(outcome.summary.entries[1].employee, "Bob Li");
        assert_eq!(outcome.summary.entries[1].single_punch_missing, 1);
        assert_eq!(outcome.summary.entries[1].total, 1);
    }

    #[test]
    fn test_bad_absence_rows_degrade_to_warnings() {
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-28 09:00:00"),
                event("Alice Chen", "2025-04-28 18:00:00"),
            ],
            leave: vec![leave("Alice Chen", "2025-13-99", "2025-04-28")],
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.code == "absence_bad_time_expr")
        );
    }

    #[test]
    fn test_records_and_summary_are_deterministic() {
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-28 09:12:07"),
                event("Bob Li", "2025-04-29 10:00:00"),
            ],
            leave: vec![leave("Alice Chen", "2025-04-28 afternoon", "2025-04-29")],
            roster: vec![roster_entry("Alice Chen"), roster_entry("Bob Li")],
            ..Default::default()
        };

        let policy = load_policy();
        let first = reconcile(&input, &policy).unwrap();
        let second = reconcile(&input, &policy).unwrap();
        assert_eq!(first.records, second.records);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_period_spans_min_to_max_event_date() {
        let input = ReconcileInput {
            events: vec![
                event("Alice Chen", "2025-04-29 09:00:00"),
                event("Bob Li", "2025-04-28 09:00:00"),
                event("Bob Li", "2025-04-30 18:00:00"),
            ],
            roster: vec![roster_entry("Alice Chen")],
            ..Default::default()
        };

        let outcome = reconcile(&input, &load_policy()).unwrap();
        assert_eq!(outcome.period.start_date, date("2025-04-28"));
        assert_eq!(outcome.period.end_date, date("2025-04-30"));
        // One record per workday for the single qualified employee.
        assert_eq!(outcome.records.len(), 3);
    }
}
