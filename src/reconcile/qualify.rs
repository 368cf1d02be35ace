//! Roster qualification.
//!
//! Attendance rules only apply to part of the roster: the configured
//! employment type, a specific work location, and grade levels below a
//! fixed ceiling. The numeric level is extracted from the free-text grade
//! label; labels without an extractable number never qualify.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::QualificationRules;
use crate::models::Employee;

static GRADE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Grade\s*(\d+)").expect("valid grade pattern"));

/// Extracts the numeric grade level from a grade label.
///
/// Returns `None` when the label carries no `Grade <number>` portion or
/// the number does not fit; such labels are treated as disqualifying.
///
/// # Examples
///
/// ```
/// use attendance_engine::reconcile::parse_grade_level;
///
/// assert_eq!(parse_grade_level("Grade 11"), Some(11));
/// assert_eq!(parse_grade_level("Grade13 (Senior)"), Some(13));
/// assert_eq!(parse_grade_level("Director"), None);
/// ```
pub fn parse_grade_level(label: &str) -> Option<u32> {
    GRADE_PATTERN
        .captures(label)
        .and_then(|captures| captures.get(1))
        .and_then(|level| level.as_str().parse().ok())
}

/// Filters the roster down to the employees subject to attendance rules.
///
/// An employee qualifies when the employment type and work location match
/// the rules exactly and the extracted grade level lies strictly below the
/// ceiling. Roster order is preserved.
pub fn qualified_employees<'a>(
    roster: &'a [Employee],
    rules: &QualificationRules,
) -> Vec<&'a Employee> {
    roster
        .iter()
        .filter(|employee| {
            employee.employment_type == rules.employment_type
                && employee.work_location == rules.work_location
                && parse_grade_level(&employee.grade_label)
                    .is_some_and(|level| level < rules.grade_ceiling)
        })
        .collect()
}
