//! Absence time-expression parsing.
//!
//! Absence records carry their start and end as one of four textual forms:
//! a bare date, a date with a morning marker, a date with an afternoon
//! marker, or a date with an explicit `HH:MM` time. A bare date or a
//! half-day marker resolves to different times depending on whether the
//! expression is the start or the end of the interval.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::DaySchedule;
use crate::error::{EngineError, EngineResult};

/// Marker tokens for the morning half-day.
const MORNING_MARKERS: [&str; 2] = ["morning", "上午"];
/// Marker tokens for the afternoon half-day.
const AFTERNOON_MARKERS: [&str; 2] = ["afternoon", "下午"];

/// Parses an absence time expression into a timestamp.
///
/// Resolution of the four accepted forms, with the schedule's default
/// windows (shown here for the 09:00–18:00 / 12:00–13:00 defaults):
///
/// | Form              | As start | As end |
/// |-------------------|----------|--------|
/// | date only         | 09:00    | 18:00  |
/// | date + morning    | 09:00    | 12:00  |
/// | date + afternoon  | 13:00    | 18:00  |
/// | date + `HH:MM`    | as given | as given |
///
/// # Arguments
///
/// * `expr` - The textual expression (e.g., "2025-04-28 morning")
/// * `is_end` - Whether the expression is the end of an interval
/// * `schedule` - The day schedule supplying the default times
///
/// # Errors
///
/// Returns [`EngineError::TimeExprParse`] when the date portion is not a
/// valid calendar date or the explicit time is not a valid `HH:MM`.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::reconcile::parse_time_expr;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// let schedule = &loader.policy().schedule;
///
/// let start = parse_time_expr("2025-04-28 morning", false, schedule).unwrap();
/// assert_eq!(start.to_string(), "2025-04-28 09:00:00");
///
/// let end = parse_time_expr("2025-04-28 morning", true, schedule).unwrap();
/// assert_eq!(end.to_string(), "2025-04-28 12:00:00");
/// ```
pub fn parse_time_expr(
    expr: &str,
    is_end: bool,
    schedule: &DaySchedule,
) -> EngineResult<NaiveDateTime> {
    let mut tokens = expr.split_whitespace();

    let date_token = tokens.next().unwrap_or("");
    let date = NaiveDate::parse_from_str(date_token, "%Y-%m-%d").map_err(|err| {
        EngineError::TimeExprParse {
            expression: expr.to_string(),
            message: format!("invalid date portion: {}", err),
        }
    })?;

    let time = match tokens.next() {
        None => {
            if is_end {
                schedule.workday_end
            } else {
                schedule.workday_start
            }
        }
        Some(token) if MORNING_MARKERS.contains(&token) => {
            if is_end {
                schedule.morning_end
            } else {
                schedule.workday_start
            }
        }
        Some(token) if AFTERNOON_MARKERS.contains(&token) => {
            if is_end {
                schedule.workday_end
            } else {
                schedule.afternoon_start
            }
        }
        Some(token) => NaiveTime::parse_from_str(token, "%H:%M").map_err(|err| {
            EngineError::TimeExprParse {
                expression: expr.to_string(),
                message: format!("invalid time portion: {}", err),
            }
        })?,
    };

    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn schedule() -> DaySchedule {
        ConfigLoader::load("config/attendance")
            .expect("Failed to load policy")
            .policy()
            .schedule
            .clone()
    }

    fn parse(expr: &str, is_end: bool) -> String {
        parse_time_expr(expr, is_end, &schedule()).unwrap().to_string()
    }

    #[test]
    fn test_bare_date_as_start_is_workday_start() {
        assert_eq!(parse("2025-04-28", false), "2025-04-28 09:00:00");
    }

    #[test]
    fn test_bare_date_as_end_is_workday_end() {
        assert_eq!(parse("2025-04-28", true), "2025-04-28 18:00:00");
    }

    #[test]
    fn test_morning_as_start() {
        assert_eq!(parse("2025-04-28 morning", false), "2025-04-28 09:00:00");
    }

    #[test]
    fn test_morning_as_end() {
        assert_eq!(parse("2025-04-28 morning", true), "2025-04-28 12:00:00");
    }

    #[test]
    fn test_afternoon_as_start() {
        assert_eq!(parse("2025-04-28 afternoon", false), "2025-04-28 13:00:00");
    }

    #[test]
    fn test_afternoon_as_end() {
        assert_eq!(parse("2025-04-28 afternoon", true), "2025-04-28 18:00:00");
    }

    #[test]
    fn test_cjk_markers_are_aliases() {
        assert_eq!(parse("2025-04-28 上午", true), "2025-04-28 12:00:00");
        assert_eq!(parse("2025-04-28 下午", false), "2025-04-28 13:00:00");
    }

    #[test]
    fn test_explicit_time_wins_over_defaults() {
        assert_eq!(parse("2025-04-28 11:00", false), "2025-04-28 11:00:00");
        assert_eq!(parse("2025-04-28 11:00", true), "2025-04-28 11:00:00");
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert_eq!(parse("  2025-04-28  morning ", true), "2025-04-28 12:00:00");
    }

    #[test]
    fn test_invalid_date_fails() {
        let err = parse_time_expr("2025-04-31", false, &schedule()).unwrap_err();
        assert!(matches!(err, EngineError::TimeExprParse { .. }));
        assert!(err.to_string().contains("2025-04-31"));
    }

    #[test]
    fn test_invalid_time_fails() {
        let err = parse_time_expr("2025-04-28 25:99", true, &schedule()).unwrap_err();
        assert!(matches!(err, EngineError::TimeExprParse { .. }));
    }

    #[test]
    fn test_unrecognised_marker_fails() {
        let err = parse_time_expr("2025-04-28 evening", true, &schedule()).unwrap_err();
        assert!(matches!(err, EngineError::TimeExprParse { .. }));
    }

    #[test]
    fn test_empty_expression_fails() {
        assert!(parse_time_expr("", false, &schedule()).is_err());
    }
}
