use std::collections::HashMap;

use async_trait::async_trait;
use database::postgres::PostgresConfig;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    entity::{academic_year, course, enrollment, exam, exam_result, grade, semester, subject},
    error::{AcademicsError, AcademicsResult},
    models::{
        EnrollmentDetail, EnrollmentStatus, GradedResult, ResultStatus, SemesterRef, SemesterView,
    },
    repository::AcademicsRepository,
};

/// PostgreSQL-backed repository for the academics domain.
pub struct PgAcademicsRepository {
    db: DatabaseConnection,
}

impl PgAcademicsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connect to the relational store and build a repository on the
    /// resulting connection.
    pub async fn connect(config: PostgresConfig) -> AcademicsResult<Self> {
        let db = database::postgres::connect_from_config(config).await?;
        Ok(Self::new(db))
    }

    /// Expand an enrollment row into its composite view, resolving the
    /// nested semester (with course), academic year and course rows.
    async fn hydrate(&self, model: enrollment::Model) -> AcademicsResult<EnrollmentDetail> {
        let semester = semester::Entity::find_by_id(model.semester_id)
            .one(&self.db)
            .await?;

        let semester_course = match &semester {
            Some(semester) => {
                course::Entity::find_by_id(semester.course_id)
                    .one(&self.db)
                    .await?
            }
            None => None,
        };

        let academic_year = academic_year::Entity::find_by_id(model.academic_year_id)
            .one(&self.db)
            .await?;

        let course = course::Entity::find_by_id(model.course_id)
            .one(&self.db)
            .await?;

        Ok(EnrollmentDetail {
            id: model.id,
            student_id: model.student_id,
            status: model.status,
            current_semester: model.current_semester,
            total_credits: model.total_credits,
            completed_credits: model.completed_credits,
            cgpa: model.cgpa,
            enrollment_date: model.enrollment_date.into(),
            semester: semester.map(|semester| SemesterView {
                id: semester.id,
                number: semester.number,
                course: semester_course.map(Into::into),
            }),
            academic_year: academic_year.map(Into::into),
            course: course.map(Into::into),
        })
    }
}

#[async_trait]
impl AcademicsRepository for PgAcademicsRepository {
    async fn find_graded_results(
        &self,
        student_id: Uuid,
        semester_id: Option<Uuid>,
    ) -> AcademicsResult<Vec<GradedResult>> {
        let mut query = exam_result::Entity::find()
            .filter(exam_result::Column::StudentId.eq(student_id))
            .filter(exam_result::Column::Status.eq(ResultStatus::Pass));

        if let Some(semester_id) = semester_id {
            query = query
                .inner_join(exam::Entity)
                .filter(exam::Column::SemesterId.eq(semester_id));
        }

        let results = query.all(&self.db).await?;
        let exams = results.load_one(exam::Entity, &self.db).await?;
        let grades = results.load_one(grade::Entity, &self.db).await?;

        let grade_models: Vec<grade::Model> = grades.iter().flatten().cloned().collect();
        let subjects = grade_models.load_one(subject::Entity, &self.db).await?;
        let mut subject_by_grade: HashMap<Uuid, subject::Model> = grade_models
            .iter()
            .zip(subjects)
            .filter_map(|(grade, subject)| subject.map(|subject| (grade.id, subject)))
            .collect();

        let mut graded = Vec::with_capacity(results.len());
        for ((result, exam), grade) in results.iter().zip(exams).zip(grades) {
            let (Some(exam), Some(grade)) = (exam, grade) else {
                debug!(result_id = %result.id, "Skipping result without exam or grade");
                continue;
            };
            let Some(subject) = subject_by_grade.remove(&grade.id) else {
                debug!(grade_id = %grade.id, "Skipping grade without subject");
                continue;
            };

            graded.push(GradedResult {
                marks_obtained: grade.marks_obtained,
                max_marks: exam.max_marks,
                credits: subject.credits,
                semester_id: exam.semester_id,
            });
        }

        Ok(graded)
    }

    async fn find_semesters(&self, ids: &[Uuid]) -> AcademicsResult<Vec<SemesterRef>> {
        let semesters = semester::Entity::find()
            .filter(semester::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(semesters.into_iter().map(Into::into).collect())
    }

    async fn find_active_enrollment(
        &self,
        student_id: Uuid,
    ) -> AcademicsResult<Option<EnrollmentDetail>> {
        let Some(model) = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::Status.eq(EnrollmentStatus::Active))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        self.hydrate(model).await.map(Some)
    }

    async fn find_enrollments(&self, student_id: Uuid) -> AcademicsResult<Vec<EnrollmentDetail>> {
        let models = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .order_by_asc(enrollment::Column::CurrentSemester)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            details.push(self.hydrate(model).await?);
        }

        Ok(details)
    }

    async fn update_current_semester(
        &self,
        enrollment_id: Uuid,
        new_semester: i32,
    ) -> AcademicsResult<EnrollmentDetail> {
        let model = enrollment::Entity::find_by_id(enrollment_id)
            .one(&self.db)
            .await?
            .ok_or(AcademicsError::EnrollmentNotFound(enrollment_id))?;

        let mut active: enrollment::ActiveModel = model.into();
        active.current_semester = Set(new_semester);

        let updated = active.update(&self.db).await?;

        info!(
            enrollment_id = %enrollment_id,
            current_semester = new_semester,
            "Updated enrollment semester"
        );

        self.hydrate(updated).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[tokio::test]
    async fn test_find_graded_results_flattens_nested_rows() {
        let student_id = Uuid::new_v4();
        let semester_id = Uuid::new_v4();
        let (result_a, result_b) = {
            let v = ids(2);
            (v[0], v[1])
        };
        let (exam_a, exam_b) = {
            let v = ids(2);
            (v[0], v[1])
        };
        let (grade_a, grade_b) = {
            let v = ids(2);
            (v[0], v[1])
        };
        let (subject_a, subject_b) = {
            let v = ids(2);
            (v[0], v[1])
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                exam_result::Model {
                    id: result_a,
                    student_id,
                    exam_id: exam_a,
                    status: ResultStatus::Pass,
                },
                exam_result::Model {
                    id: result_b,
                    student_id,
                    exam_id: exam_b,
                    status: ResultStatus::Pass,
                },
            ]])
            .append_query_results([vec![
                exam::Model {
                    id: exam_a,
                    name: "Midterm".to_string(),
                    max_marks: 100,
                    semester_id,
                },
                exam::Model {
                    id: exam_b,
                    name: "Final".to_string(),
                    max_marks: 50,
                    semester_id,
                },
            ]])
            .append_query_results([vec![
                grade::Model {
                    id: grade_a,
                    exam_result_id: result_a,
                    subject_id: subject_a,
                    marks_obtained: 95.0,
                },
                grade::Model {
                    id: grade_b,
                    exam_result_id: result_b,
                    subject_id: subject_b,
                    marks_obtained: 32.5,
                },
            ]])
            .append_query_results([vec![
                subject::Model {
                    id: subject_a,
                    name: "Algorithms".to_string(),
                    credits: 4,
                },
                subject::Model {
                    id: subject_b,
                    name: "Databases".to_string(),
                    credits: 3,
                },
            ]])
            .into_connection();

        let repo = PgAcademicsRepository::new(db);
        let mut graded = repo.find_graded_results(student_id, None).await.unwrap();
        graded.sort_by(|a, b| b.credits.cmp(&a.credits));

        assert_eq!(graded.len(), 2);
        assert_eq!(graded[0].max_marks, 100);
        assert_eq!(graded[0].credits, 4);
        assert!((graded[0].percentage() - 95.0).abs() < f64::EPSILON);
        assert_eq!(graded[1].max_marks, 50);
        assert!((graded[1].percentage() - 65.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_find_graded_results_skips_ungraded_rows() {
        let student_id = Uuid::new_v4();
        let result_id = Uuid::new_v4();
        let exam_id = Uuid::new_v4();

        // One PASS result whose grade row is missing: nothing to aggregate
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![exam_result::Model {
                id: result_id,
                student_id,
                exam_id,
                status: ResultStatus::Pass,
            }]])
            .append_query_results([vec![exam::Model {
                id: exam_id,
                name: "Midterm".to_string(),
                max_marks: 100,
                semester_id: Uuid::new_v4(),
            }]])
            .append_query_results([Vec::<grade::Model>::new()])
            .append_query_results([Vec::<subject::Model>::new()])
            .into_connection();

        let repo = PgAcademicsRepository::new(db);
        let graded = repo.find_graded_results(student_id, None).await.unwrap();

        assert!(graded.is_empty());
    }

    #[tokio::test]
    async fn test_find_active_enrollment_none_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<enrollment::Model>::new()])
            .into_connection();

        let repo = PgAcademicsRepository::new(db);
        let found = repo.find_active_enrollment(Uuid::new_v4()).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_current_semester_missing_enrollment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<enrollment::Model>::new()])
            .into_connection();

        let repo = PgAcademicsRepository::new(db);
        let enrollment_id = Uuid::new_v4();
        let err = repo
            .update_current_semester(enrollment_id, 4)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AcademicsError::EnrollmentNotFound(id) if id == enrollment_id
        ));
    }
}
