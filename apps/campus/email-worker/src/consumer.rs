//! Consumer loop popping jobs from the queue lanes.

use std::sync::Arc;
use std::time::Duration;

use domain_mailer::{EmailJob, MailerResult, QueueLane};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::delivery::DeliveryHandler;

const MAX_BACKOFF_SECS: u64 = 30;

/// Configuration for the queue consumer.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Seconds a single BRPOP blocks before the loop re-checks for
    /// shutdown.
    pub block_secs: f64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            block_secs: std::env::var("EMAIL_POLL_BLOCK_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(1.0),
        }
    }
}

/// Pops email jobs from the queue lanes and hands them to the delivery
/// handler, high lane first.
pub struct QueueConsumer<D: DeliveryHandler> {
    conn: ConnectionManager,
    handler: Arc<D>,
    config: ConsumerConfig,
}

impl<D: DeliveryHandler + 'static> QueueConsumer<D> {
    pub fn new(conn: ConnectionManager, handler: D, config: ConsumerConfig) -> Self {
        Self {
            conn,
            handler: Arc::new(handler),
            config,
        }
    }

    /// Run the consumer loop until the shutdown signal flips.
    ///
    /// Store errors back the loop off exponentially instead of tearing it
    /// down; the connection manager reconnects underneath.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> MailerResult<()> {
        info!(handler = self.handler.name(), "Starting email queue consumer");

        let mut consecutive_errors: u32 = 0;

        loop {
            if *shutdown.borrow() {
                info!("Received shutdown signal, stopping consumer");
                break;
            }

            match self.poll_once().await {
                Ok(delivered) => {
                    if consecutive_errors > 0 {
                        info!("Connection recovered after {} errors", consecutive_errors);
                        consecutive_errors = 0;
                    }
                    if let Some(job_id) = delivered {
                        debug!(job_id = %job_id, "Delivered email job");
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    let backoff_secs = 2u64.pow(consecutive_errors.min(5)).min(MAX_BACKOFF_SECS);
                    warn!(
                        error = %e,
                        consecutive_errors = %consecutive_errors,
                        backoff_secs = %backoff_secs,
                        "Queue poll failed, backing off"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_secs(backoff_secs)) => {}
                        _ = shutdown.changed() => {}
                    }
                }
            }
        }

        Ok(())
    }

    /// One blocking poll across both lanes.
    ///
    /// BRPOP checks keys in the given order, so a waiting high-priority job
    /// always wins over a normal one. Returns the delivered job id, or
    /// `None` when the block timed out or a malformed payload was dropped.
    pub async fn poll_once(&self) -> MailerResult<Option<String>> {
        let mut conn = self.conn.clone();

        let keys = QueueLane::poll_order().map(|lane| lane.key());
        let popped: Option<(String, String)> = conn.brpop(&keys[..], self.config.block_secs).await?;

        let Some((lane, payload)) = popped else {
            return Ok(None);
        };

        let job: EmailJob = match serde_json::from_str(&payload) {
            Ok(job) => job,
            Err(e) => {
                // Never wedge the loop on a bad payload
                error!(error = %e, lane = %lane, "Dropping malformed email job payload");
                return Ok(None);
            }
        };

        let job_id = job.id.clone().unwrap_or_default();
        self.handler.deliver(&job).await?;

        Ok(Some(job_id))
    }
}
