//! Mailer Domain
//!
//! Durable hand-off of transactional email jobs to a Redis-backed queue,
//! decoupling email generation from delivery.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Calling service │  ← registration, applications, exams, payments
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    EmailQueue    │  ← builds jobs, LPUSHes to a priority lane
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐     ┌──────────────────┐
//! │   email_queue    │     │ email_queue_high │  ← two Redis lists
//! └────────┬─────────┘     └────────┬─────────┘
//!          └───────────┬────────────┘
//!                      │
//!             ┌────────▼─────────┐
//!             │   Email worker   │  ← BRPOPs high lane first, delivers
//!             └──────────────────┘
//! ```
//!
//! Jobs are serialized as JSON and pushed onto the head of the lane matching
//! their priority; a worker pops from the tail, so each lane is FIFO. The
//! queue never interleaves lanes itself — strict priority is the consumer's
//! policy, made possible by the two-lane split.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_mailer::{EmailQueue, EmailQueueConfig};
//!
//! let mut queue = EmailQueue::new(EmailQueueConfig::default());
//! queue.connect().await?;
//!
//! queue.send_welcome_email("jane@example.com", "Jane").await?;
//! ```

pub mod error;
pub mod lanes;
pub mod models;
pub mod queue;
pub mod templates;

// Re-export commonly used types
pub use error::{MailerError, MailerResult};
pub use lanes::QueueLane;
pub use models::{Attachment, AttachmentContent, EmailJob, EmailPriority};
pub use queue::{EmailQueue, EmailQueueConfig};
