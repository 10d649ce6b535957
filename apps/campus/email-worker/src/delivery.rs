//! Delivery seam between the consumer loop and an actual mail provider.

use async_trait::async_trait;
use domain_mailer::{EmailJob, MailerResult};
use tracing::info;

/// Handles a dequeued job. Implementations wrap a mail provider; the
/// consumer stays agnostic of how delivery happens.
#[async_trait]
pub trait DeliveryHandler: Send + Sync {
    async fn deliver(&self, job: &EmailJob) -> MailerResult<()>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Delivery handler that records the job in the logs instead of sending.
/// Stands in wherever no real provider is wired up.
pub struct LogDelivery;

#[async_trait]
impl DeliveryHandler for LogDelivery {
    async fn deliver(&self, job: &EmailJob) -> MailerResult<()> {
        info!(
            job_id = job.id.as_deref().unwrap_or("<unset>"),
            to = ?job.to,
            subject = %job.subject,
            priority = %job.priority,
            "Delivering email"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
