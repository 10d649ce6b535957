//! GPA aggregation over passed exam results.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, instrument};
use uuid::Uuid;

use crate::error::AcademicsResult;
use crate::models::{AcademicRecord, GradedResult, SemesterGpa};
use crate::repository::AcademicsRepository;

/// Map a percentage score to a grade point on the 4.0 scale.
///
/// Step function, not interpolation: 79.9% and 70.0% earn the same point.
pub fn grade_point(percentage: f64) -> f64 {
    if percentage >= 90.0 {
        4.0
    } else if percentage >= 80.0 {
        3.0
    } else if percentage >= 70.0 {
        2.0
    } else if percentage >= 60.0 {
        1.0
    } else {
        0.0
    }
}

/// Credit-weighted GPA across a set of graded results, rounded half-up to
/// two decimals. Zero total credits yields 0 rather than dividing.
///
/// Rounding applies only here; percentages and grade points stay exact.
pub fn weighted_gpa(results: &[GradedResult]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_credits: i64 = 0;

    for result in results {
        weighted_sum += grade_point(result.percentage()) * f64::from(result.credits);
        total_credits += i64::from(result.credits);
    }

    if total_credits == 0 {
        return 0.0;
    }

    round_gpa(weighted_sum / total_credits as f64)
}

fn round_gpa(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes GPA values from a student's passed exam results.
///
/// All operations are best-effort reads: retrieval failures are logged and
/// collapse to `0`/empty so callers never see a store error. A GPA of `0`
/// is therefore ambiguous between "no passing results yet" and "lookup
/// failed"; the log line is the distinguishing signal.
#[derive(Clone)]
pub struct GradeAggregator<R: AcademicsRepository> {
    repository: Arc<R>,
}

impl<R: AcademicsRepository> GradeAggregator<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Cumulative GPA across the whole academic history.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn calculate_cgpa(&self, student_id: Uuid) -> f64 {
        match self.try_gpa(student_id, None).await {
            Ok(gpa) => gpa,
            Err(e) => {
                error!(error = %e, student_id = %student_id, "CGPA calculation failed, defaulting to 0");
                0.0
            }
        }
    }

    /// GPA scoped to one semester's exams.
    #[instrument(skip(self), fields(student_id = %student_id, semester_id = %semester_id))]
    pub async fn calculate_semester_gpa(&self, student_id: Uuid, semester_id: Uuid) -> f64 {
        match self.try_gpa(student_id, Some(semester_id)).await {
            Ok(gpa) => gpa,
            Err(e) => {
                error!(error = %e, student_id = %student_id, "Semester GPA calculation failed, defaulting to 0");
                0.0
            }
        }
    }

    /// Cumulative GPA plus per-semester performance, ordered by semester
    /// number. Semesters with no passing graded result are absent.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn academic_record(&self, student_id: Uuid) -> AcademicRecord {
        match self.try_academic_record(student_id).await {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, student_id = %student_id, "Academic record lookup failed, returning empty record");
                AcademicRecord::default()
            }
        }
    }

    async fn try_gpa(&self, student_id: Uuid, semester_id: Option<Uuid>) -> AcademicsResult<f64> {
        let results = self
            .repository
            .find_graded_results(student_id, semester_id)
            .await?;

        Ok(weighted_gpa(&results))
    }

    async fn try_academic_record(&self, student_id: Uuid) -> AcademicsResult<AcademicRecord> {
        let results = self.repository.find_graded_results(student_id, None).await?;

        let cgpa = weighted_gpa(&results);

        let mut by_semester: HashMap<Uuid, Vec<GradedResult>> = HashMap::new();
        for result in &results {
            by_semester
                .entry(result.semester_id)
                .or_default()
                .push(result.clone());
        }

        let semester_ids: Vec<Uuid> = by_semester.keys().copied().collect();
        let mut semesters = self.repository.find_semesters(&semester_ids).await?;
        semesters.sort_by_key(|s| s.number);

        let semester_performance = semesters
            .into_iter()
            .filter_map(|semester| {
                by_semester.get(&semester.id).map(|group| SemesterGpa {
                    semester: semester.number,
                    gpa: weighted_gpa(group),
                })
            })
            .collect();

        Ok(AcademicRecord {
            cgpa,
            semester_performance,
        })
    }
}
