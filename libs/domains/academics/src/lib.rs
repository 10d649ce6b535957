//! Academics Domain
//!
//! Academic performance aggregation and enrollment progress tracking.
//!
//! Two services operate over the relational store:
//!
//! - [`GradeAggregator`] converts a student's passed exam results into a GPA
//!   on a 4.0 scale, either cumulatively or scoped to one semester, and
//!   assembles the per-semester academic record.
//! - [`SemesterProgressTracker`] exposes a student's position in their
//!   program and advances the current-semester counter on the active
//!   enrollment.
//!
//! Reads are best-effort: failures are logged and collapse to safe defaults
//! (`0`, `None`) so reporting screens never surface store errors. Writes
//! propagate their errors; silently dropping an enrollment update would be a
//! correctness violation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_academics::{GradeAggregator, PgAcademicsRepository};
//!
//! let repo = PgAcademicsRepository::new(db);
//! let aggregator = GradeAggregator::new(repo);
//!
//! let cgpa = aggregator.calculate_cgpa(student_id).await;
//! ```

pub mod entity;
pub mod error;
pub mod gpa;
pub mod models;
pub mod postgres;
pub mod progress;
pub mod repository;

// Re-export commonly used types
pub use error::{AcademicsError, AcademicsResult};
pub use gpa::{GradeAggregator, grade_point, weighted_gpa};
pub use models::{
    AcademicRecord, AcademicYearView, CourseView, EnrollmentDetail, EnrollmentStatus,
    GradedResult, ResultStatus, SemesterGpa, SemesterProgress, SemesterRef, SemesterView,
};
pub use postgres::PgAcademicsRepository;
pub use progress::SemesterProgressTracker;
pub use repository::AcademicsRepository;
