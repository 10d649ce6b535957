use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Outcome of a student's exam attempt
///
/// Only `Pass` results contribute to GPA aggregation; the other states are
/// excluded entirely, not zero-weighted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "result_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    #[sea_orm(string_value = "PASS")]
    Pass,
    #[sea_orm(string_value = "FAIL")]
    Fail,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "WITHHELD")]
    Withheld,
}

/// Lifecycle state of an enrollment
///
/// A student has at most one `Active` enrollment at a time (assumed by the
/// callers, not enforced here).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "WITHDRAWN")]
    Withdrawn,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

/// One passing exam result, flattened with its primary grade, the subject's
/// credit weight and the exam's context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedResult {
    pub marks_obtained: f64,
    pub max_marks: i32,
    pub credits: i32,
    pub semester_id: Uuid,
}

impl GradedResult {
    /// Score as a percentage of the exam's maximum marks.
    pub fn percentage(&self) -> f64 {
        if self.max_marks <= 0 {
            return 0.0;
        }
        self.marks_obtained / f64::from(self.max_marks) * 100.0
    }
}

/// Minimal semester reference used to order and label performance entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRef {
    pub id: Uuid,
    pub number: i32,
}

/// GPA achieved in one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterGpa {
    pub semester: i32,
    pub gpa: f64,
}

/// Cumulative GPA plus per-semester breakdown, ordered by semester number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub cgpa: f64,
    pub semester_performance: Vec<SemesterGpa>,
}

/// Course detail as seen by enrollment views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseView {
    pub id: Uuid,
    pub name: String,
    pub total_semester: i32,
}

/// Academic year detail as seen by enrollment views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicYearView {
    pub id: Uuid,
    pub name: String,
}

/// Semester detail with its nested course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterView {
    pub id: Uuid,
    pub number: i32,
    pub course: Option<CourseView>,
}

/// Composite view of one enrollment with its nested semester, academic year
/// and course details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    pub id: Uuid,
    pub student_id: Uuid,
    pub status: EnrollmentStatus,
    pub current_semester: i32,
    pub total_credits: i32,
    pub completed_credits: i32,
    pub cgpa: f64,
    pub enrollment_date: DateTime<Utc>,
    pub semester: Option<SemesterView>,
    pub academic_year: Option<AcademicYearView>,
    pub course: Option<CourseView>,
}

/// A student's enrollments ordered by semester, with the active one
/// highlighted and the derived completion percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterProgress {
    pub enrollments: Vec<EnrollmentDetail>,
    pub active: Option<EnrollmentDetail>,
    pub progress_percentage: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let result = GradedResult {
            marks_obtained: 45.0,
            max_marks: 50,
            credits: 3,
            semester_id: Uuid::nil(),
        };
        assert!((result.percentage() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_guards_zero_max_marks() {
        let result = GradedResult {
            marks_obtained: 45.0,
            max_marks: 0,
            credits: 3,
            semester_id: Uuid::nil(),
        };
        assert_eq!(result.percentage(), 0.0);
    }

    #[test]
    fn test_status_round_trips_as_screaming_snake() {
        let json = serde_json::to_string(&ResultStatus::Withheld).unwrap();
        assert_eq!(json, "\"WITHHELD\"");

        let parsed: EnrollmentStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(parsed, EnrollmentStatus::Active);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ResultStatus::Pass.to_string(), "PASS");
        assert_eq!(EnrollmentStatus::Withdrawn.to_string(), "WITHDRAWN");
    }
}
