//! Employee roster model and related types.
//!
//! This module defines the Employee struct and EmploymentType enum
//! for representing roster entries in the attendance reconciliation system.

use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement on the roster.
///
/// Roster rows carry a free-form employee-type label; anything the engine
/// does not recognise lands in [`EmploymentType::Other`] and simply never
/// qualifies for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment, the only type subject to attendance rules.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Casual or contractor arrangements.
    Casual,
    /// Any unrecognised employee-type label.
    #[serde(other)]
    Other,
}

/// Represents an employee on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employee's name, used as the join key across all source tables.
    pub name: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// The work-location label (e.g., an office city).
    pub work_location: String,
    /// The free-text grade label (e.g., "Grade 11"). The numeric level is
    /// extracted during qualification; labels that yield no number
    /// disqualify the employee.
    pub grade_label: String,
}

impl Employee {
    /// Returns true if the employee is a full-time worker.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, EmploymentType};
    ///
    /// let employee = Employee {
    ///     name: "Alice Chen".to_string(),
    ///     department: "Engineering".to_string(),
    ///     employment_type: EmploymentType::FullTime,
    ///     work_location: "Shanghai".to_string(),
    ///     grade_label: "Grade 10".to_string(),
    /// };
    /// assert!(employee.is_full_time());
    /// ```
    pub fn is_full_time(&self) -> bool {
        self.employment_type == EmploymentType::FullTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(employment_type: EmploymentType) -> Employee {
        Employee {
            name: "Alice Chen".to_string(),
            department: "Engineering".to_string(),
            employment_type,
            work_location: "Shanghai".to_string(),
            grade_label: "Grade 10".to_string(),
        }
    }

    #[test]
    fn test_deserialize_fulltime_employee() {
        let json = r#"{
            "name": "Alice Chen",
            "department": "Engineering",
            "employment_type": "full_time",
            "work_location": "Shanghai",
            "grade_label": "Grade 10"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.name, "Alice Chen");
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert_eq!(employee.work_location, "Shanghai");
        assert_eq!(employee.grade_label, "Grade 10");
    }

    #[test]
    fn test_unknown_employment_label_falls_back_to_other() {
        let json = r#"{
            "name": "Bob Li",
            "department": "Finance",
            "employment_type": "intern",
            "work_location": "Beijing",
            "grade_label": "Grade 7"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employment_type, EmploymentType::Other);
        assert!(!employee.is_full_time());
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee(EmploymentType::FullTime);
        let json = serde_json::to_string(&employee).unwrap();

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_is_full_time_returns_false_for_parttime() {
        let employee = create_test_employee(EmploymentType::PartTime);
        assert!(!employee.is_full_time());
    }

    #[test]
    fn test_is_full_time_returns_false_for_casual() {
        let employee = create_test_employee(EmploymentType::Casual);
        assert!(!employee.is_full_time());
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"full_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::PartTime).unwrap(),
            "\"part_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::Casual).unwrap(),
            "\"casual\""
        );
    }
}
