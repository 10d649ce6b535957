use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AcademicsResult;
use crate::models::{EnrollmentDetail, GradedResult, SemesterRef};

/// Repository trait for the academic data store
///
/// Everything is a filtered lookup with nested relations pre-flattened into
/// domain views; `update_current_semester` is the single write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AcademicsRepository: Send + Sync {
    /// All PASS-status exam results for a student, flattened with their
    /// primary grade, subject credits and exam context. `semester_id`
    /// restricts the lookup to exams of that semester.
    async fn find_graded_results(
        &self,
        student_id: Uuid,
        semester_id: Option<Uuid>,
    ) -> AcademicsResult<Vec<GradedResult>>;

    /// Resolve semester ids to their references (number labels).
    async fn find_semesters(&self, ids: &[Uuid]) -> AcademicsResult<Vec<SemesterRef>>;

    /// The student's ACTIVE enrollment with nested semester/year/course
    /// detail, if one exists.
    async fn find_active_enrollment(
        &self,
        student_id: Uuid,
    ) -> AcademicsResult<Option<EnrollmentDetail>>;

    /// All enrollments for a student, any status, ordered by
    /// `current_semester` ascending.
    async fn find_enrollments(&self, student_id: Uuid) -> AcademicsResult<Vec<EnrollmentDetail>>;

    /// Persist a new `current_semester` value on an enrollment and return
    /// the updated detail view.
    async fn update_current_semester(
        &self,
        enrollment_id: Uuid,
        new_semester: i32,
    ) -> AcademicsResult<EnrollmentDetail>;
}
