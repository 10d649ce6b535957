use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AcademicsError {
    #[error("No active enrollment found for student {0}")]
    NoActiveEnrollment(Uuid),

    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(String),
}

pub type AcademicsResult<T> = Result<T, AcademicsError>;

impl From<sea_orm::DbErr> for AcademicsError {
    fn from(err: sea_orm::DbErr) -> Self {
        AcademicsError::Database(err.to_string())
    }
}
