//! SeaORM entities for the academic data consumed by this domain.
//!
//! Everything except `enrollment` is read-only from here; enrollments are
//! written by the progress tracker's update operation.

pub mod academic_year;
pub mod course;
pub mod enrollment;
pub mod exam;
pub mod exam_result;
pub mod grade;
pub mod semester;
pub mod subject;
