//! Email queue service: durable hand-off of jobs to the backing store.

use chrono::Utc;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{MailerError, MailerResult};
use crate::lanes::QueueLane;
use crate::models::{self, EmailJob, EmailPriority};
use crate::templates;

/// Configuration for the email queue.
#[derive(Debug, Clone)]
pub struct EmailQueueConfig {
    /// Redis connection URL for the backing store.
    pub redis_url: String,
}

impl EmailQueueConfig {
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
        }
    }
}

impl Default for EmailQueueConfig {
    fn default() -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .or_else(|_| std::env::var("REDIS_HOST"))
                .unwrap_or_else(|_| database::redis::DEFAULT_REDIS_URL.to_string()),
        }
    }
}

/// Service for queueing email jobs onto the priority lanes.
///
/// One instance holds one store connection; construct it at process start,
/// share it across producers, and `disconnect` at shutdown. Enqueues are
/// independent atomic pushes, so concurrent callers need no coordination.
pub struct EmailQueue {
    conn: Option<ConnectionManager>,
    config: EmailQueueConfig,
}

impl EmailQueue {
    /// Create an unconnected queue. Call [`connect`](Self::connect) before
    /// enqueueing.
    pub fn new(config: EmailQueueConfig) -> Self {
        Self { conn: None, config }
    }

    /// Establish the store connection.
    ///
    /// Fatal at startup: the failure is logged and returned to the caller.
    pub async fn connect(&mut self) -> MailerResult<()> {
        match database::redis::connect(&self.config.redis_url).await {
            Ok(manager) => {
                self.conn = Some(manager);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, url = %self.config.redis_url, "Failed to connect email queue");
                Err(e.into())
            }
        }
    }

    /// Release the store connection. No-op when already disconnected.
    pub fn disconnect(&mut self) {
        if self.conn.take().is_some() {
            info!("Email queue disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn connection(&self) -> MailerResult<ConnectionManager> {
        self.conn.clone().ok_or(MailerError::NotConnected)
    }

    /// Push a job onto the lane matching its priority.
    ///
    /// Assigns an id when the caller left it empty and stamps
    /// `metadata.createdAt`, preserving any caller-supplied metadata keys.
    /// Store failures propagate: a silently dropped email would be a
    /// correctness violation, so retry policy belongs to the caller.
    ///
    /// Returns the job id.
    pub async fn enqueue(&self, mut job: EmailJob) -> MailerResult<String> {
        let mut conn = self.connection()?;

        let id = job
            .id
            .take()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| models::generate_id("email"));
        job.id = Some(id.clone());

        job.metadata.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let lane = QueueLane::for_priority(job.priority);
        let payload = serde_json::to_string(&job)?;

        let _: () = conn.lpush(lane.key(), payload).await?;

        debug!(
            job_id = %id,
            lane = %lane,
            priority = %job.priority,
            to = ?job.to,
            "Queued email job"
        );

        Ok(id)
    }

    /// Number of jobs waiting across both lanes.
    ///
    /// Best-effort read: store failures are logged and reported as `0`.
    pub async fn queue_depth(&self) -> u64 {
        match self.try_queue_depth().await {
            Ok(depth) => depth,
            Err(e) => {
                warn!(error = %e, "Failed to read queue depth");
                0
            }
        }
    }

    async fn try_queue_depth(&self) -> MailerResult<u64> {
        let mut conn = self.connection()?;

        let normal: u64 = conn.llen(QueueLane::Normal.key()).await?;
        let high: u64 = conn.llen(QueueLane::High.key()).await?;

        Ok(normal + high)
    }

    /// Queue a welcome email for a new student. Time-based job id.
    pub async fn send_welcome_email(&self, to: &str, name: &str) -> MailerResult<String> {
        let (subject, html, text) = templates::welcome(name);

        let job = EmailJob::new(vec![to.to_string()], subject)
            .with_body(html, text)
            .with_priority(EmailPriority::Normal)
            .with_metadata_entry("type", "welcome");

        let id = self.enqueue(job).await?;

        info!(to = %to, job_id = %id, "Queued welcome email");

        Ok(id)
    }

    /// Queue an application status update. Job id is derived from the
    /// application id so repeated updates for one application coalesce at
    /// the store if the consumer dedupes.
    pub async fn send_application_status_email(
        &self,
        to: &str,
        name: &str,
        application_id: &str,
        status: &str,
    ) -> MailerResult<String> {
        let (subject, html, text) = templates::application_status(name, application_id, status);

        let job = EmailJob::new(vec![to.to_string()], subject)
            .with_id(format!("status_{}", application_id))
            .with_body(html, text)
            .with_priority(EmailPriority::Normal)
            .with_metadata_entry("type", "application_status")
            .with_metadata_entry("applicationId", application_id);

        let id = self.enqueue(job).await?;

        info!(
            to = %to,
            application_id = %application_id,
            status = %status,
            "Queued application status email"
        );

        Ok(id)
    }

    /// Queue an exam notification. High priority; job id is derived from
    /// the exam and student ids.
    pub async fn send_exam_notification_email(
        &self,
        to: &str,
        name: &str,
        exam_name: &str,
        exam_date: &str,
        exam_id: &str,
        student_id: &str,
    ) -> MailerResult<String> {
        let (subject, html, text) = templates::exam_notification(name, exam_name, exam_date);

        let job = EmailJob::new(vec![to.to_string()], subject)
            .with_id(format!("exam_{}_{}", exam_id, student_id))
            .with_body(html, text)
            .with_priority(EmailPriority::High)
            .with_metadata_entry("type", "exam_notification")
            .with_metadata_entry("examId", exam_id);

        let id = self.enqueue(job).await?;

        info!(
            to = %to,
            exam = %exam_name,
            job_id = %id,
            "Queued exam notification email"
        );

        Ok(id)
    }

    /// Queue a password reset email. High priority; job id is derived from
    /// the user id, so repeated requests for one user coalesce.
    pub async fn send_password_reset_email(
        &self,
        to: &str,
        name: &str,
        user_id: &str,
        reset_url: &str,
    ) -> MailerResult<String> {
        let (subject, html, text) = templates::password_reset(name, reset_url);

        let job = EmailJob::new(vec![to.to_string()], subject)
            .with_id(format!("reset_{}", user_id))
            .with_body(html, text)
            .with_priority(EmailPriority::High)
            .with_metadata_entry("type", "password_reset")
            .with_metadata_entry("userId", user_id);

        let id = self.enqueue(job).await?;

        info!(to = %to, user_id = %user_id, "Queued password reset email");

        Ok(id)
    }
}
