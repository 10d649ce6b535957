//! Semester progress tracking over a student's enrollments.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AcademicsError, AcademicsResult};
use crate::models::{EnrollmentDetail, SemesterProgress};
use crate::repository::AcademicsRepository;

/// Completion percentage of a program position, rounded to whole percent.
/// A zero (or negative) semester count is treated as one to keep the
/// division defined.
pub fn progress_percentage(current_semester: i32, total_semesters: i32) -> i32 {
    let total = if total_semesters <= 0 { 1 } else { total_semesters };
    ((f64::from(current_semester) / f64::from(total)) * 100.0).round() as i32
}

/// Exposes and advances a student's position in their academic program.
///
/// The read operations are best-effort (`None` on any failure); the update
/// propagates its errors, since silently dropping a semester change would
/// corrupt the enrollment record.
#[derive(Clone)]
pub struct SemesterProgressTracker<R: AcademicsRepository> {
    repository: Arc<R>,
}

impl<R: AcademicsRepository> SemesterProgressTracker<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The student's ACTIVE enrollment as a composite view, or `None` when
    /// there is no active enrollment or the lookup fails.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn current_semester(&self, student_id: Uuid) -> Option<EnrollmentDetail> {
        match self.repository.find_active_enrollment(student_id).await {
            Ok(enrollment) => enrollment,
            Err(e) => {
                warn!(error = %e, student_id = %student_id, "Failed to load active enrollment");
                None
            }
        }
    }

    /// All enrollments ordered by semester, the active one highlighted, and
    /// the derived completion percentage. `None` on any failure.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn semester_progress(&self, student_id: Uuid) -> Option<SemesterProgress> {
        match self.try_semester_progress(student_id).await {
            Ok(progress) => Some(progress),
            Err(e) => {
                warn!(error = %e, student_id = %student_id, "Failed to load semester progress");
                None
            }
        }
    }

    /// Move the student's ACTIVE enrollment to a new semester.
    ///
    /// Fails with [`AcademicsError::NoActiveEnrollment`] when none exists;
    /// never creates one. The new value is not bounds-checked against the
    /// course length, and concurrent updates are last-writer-wins.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn update_current_semester(
        &self,
        student_id: Uuid,
        new_semester: i32,
    ) -> AcademicsResult<EnrollmentDetail> {
        let active = self
            .repository
            .find_active_enrollment(student_id)
            .await?
            .ok_or(AcademicsError::NoActiveEnrollment(student_id))?;

        let updated = self
            .repository
            .update_current_semester(active.id, new_semester)
            .await?;

        info!(
            student_id = %student_id,
            enrollment_id = %active.id,
            current_semester = new_semester,
            "Updated current semester"
        );

        Ok(updated)
    }

    async fn try_semester_progress(&self, student_id: Uuid) -> AcademicsResult<SemesterProgress> {
        let enrollments = self.repository.find_enrollments(student_id).await?;
        let active = self.repository.find_active_enrollment(student_id).await?;

        let percentage = active
            .as_ref()
            .map(|enrollment| {
                let total = enrollment
                    .course
                    .as_ref()
                    .map(|course| course.total_semester)
                    .unwrap_or(0);
                progress_percentage(enrollment.current_semester, total)
            })
            .unwrap_or(0);

        Ok(SemesterProgress {
            enrollments,
            active,
            progress_percentage: percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::{CourseView, EnrollmentStatus};
    use crate::repository::MockAcademicsRepository;

    fn enrollment(id: Uuid, student_id: Uuid, current: i32, total: i32) -> EnrollmentDetail {
        EnrollmentDetail {
            id,
            student_id,
            status: EnrollmentStatus::Active,
            current_semester: current,
            total_credits: 120,
            completed_credits: current * 20,
            cgpa: 3.2,
            enrollment_date: Utc::now(),
            semester: None,
            academic_year: None,
            course: Some(CourseView {
                id: Uuid::new_v4(),
                name: "B.Sc. Computer Science".to_string(),
                total_semester: total,
            }),
        }
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(3, 6), 50);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(6, 6), 100);
    }

    #[test]
    fn test_progress_percentage_guards_zero_total() {
        // A zero-length program is treated as a single semester
        assert_eq!(progress_percentage(3, 0), 300);
        assert_eq!(progress_percentage(0, 0), 0);
    }

    #[tokio::test]
    async fn test_current_semester_returns_active_enrollment() {
        let student_id = Uuid::new_v4();
        let detail = enrollment(Uuid::new_v4(), student_id, 3, 6);
        let expected = detail.clone();

        let mut repo = MockAcademicsRepository::new();
        repo.expect_find_active_enrollment()
            .returning(move |_| Ok(Some(detail.clone())));

        let tracker = SemesterProgressTracker::new(repo);
        assert_eq!(tracker.current_semester(student_id).await, Some(expected));
    }

    #[tokio::test]
    async fn test_current_semester_swallows_failures() {
        let mut repo = MockAcademicsRepository::new();
        repo.expect_find_active_enrollment()
            .returning(|_| Err(AcademicsError::Database("connection refused".to_string())));

        let tracker = SemesterProgressTracker::new(repo);
        assert_eq!(tracker.current_semester(Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_semester_progress_derives_percentage() {
        let student_id = Uuid::new_v4();
        let active = enrollment(Uuid::new_v4(), student_id, 3, 6);
        let history = vec![
            enrollment(Uuid::new_v4(), student_id, 1, 6),
            active.clone(),
        ];

        let mut repo = MockAcademicsRepository::new();
        let listed = history.clone();
        repo.expect_find_enrollments()
            .returning(move |_| Ok(listed.clone()));
        let current = active.clone();
        repo.expect_find_active_enrollment()
            .returning(move |_| Ok(Some(current.clone())));

        let tracker = SemesterProgressTracker::new(repo);
        let progress = tracker.semester_progress(student_id).await.unwrap();

        assert_eq!(progress.enrollments.len(), 2);
        assert_eq!(progress.active, Some(active));
        assert_eq!(progress.progress_percentage, 50);
    }

    #[tokio::test]
    async fn test_semester_progress_none_on_failure() {
        let mut repo = MockAcademicsRepository::new();
        repo.expect_find_enrollments()
            .returning(|_| Err(AcademicsError::Database("timeout".to_string())));

        let tracker = SemesterProgressTracker::new(repo);
        assert!(tracker.semester_progress(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_update_fails_without_active_enrollment() {
        let student_id = Uuid::new_v4();

        let mut repo = MockAcademicsRepository::new();
        repo.expect_find_active_enrollment().returning(|_| Ok(None));
        // The update must never run, let alone create an enrollment
        repo.expect_update_current_semester().never();

        let tracker = SemesterProgressTracker::new(repo);
        let err = tracker
            .update_current_semester(student_id, 4)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AcademicsError::NoActiveEnrollment(id) if id == student_id
        ));
    }

    #[tokio::test]
    async fn test_update_persists_new_semester() {
        let student_id = Uuid::new_v4();
        let enrollment_id = Uuid::new_v4();
        let active = enrollment(enrollment_id, student_id, 3, 6);

        let mut repo = MockAcademicsRepository::new();
        repo.expect_find_active_enrollment()
            .returning(move |_| Ok(Some(active.clone())));
        repo.expect_update_current_semester()
            .withf(move |id, semester| *id == enrollment_id && *semester == 4)
            .returning(move |id, semester| {
                let mut updated = enrollment(id, student_id, semester, 6);
                updated.completed_credits = 60;
                Ok(updated)
            });

        let tracker = SemesterProgressTracker::new(repo);
        let updated = tracker
            .update_current_semester(student_id, 4)
            .await
            .unwrap();

        assert_eq!(updated.current_semester, 4);
        assert_eq!(updated.id, enrollment_id);
    }
}
