//! Error types for the mailer domain.

use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Errors that can occur in the mailer domain.
#[derive(Debug, Error)]
pub enum MailerError {
    /// The queue has not been connected (or was disconnected).
    #[error("Email queue is not connected")]
    NotConnected,

    /// Redis queue error.
    #[error("Queue error: {0}")]
    Queue(String),

    /// Job could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for MailerError {
    fn from(err: redis::RedisError) -> Self {
        MailerError::Queue(err.to_string())
    }
}

impl From<serde_json::Error> for MailerError {
    fn from(err: serde_json::Error) -> Self {
        MailerError::Serialization(err.to_string())
    }
}
