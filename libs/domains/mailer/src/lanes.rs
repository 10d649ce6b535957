//! Queue lane definitions for the mailer domain.
//!
//! The backing store holds two well-known lists, one per priority band.
//! Jobs are pushed onto the head of a lane and popped from the tail, so
//! ordering is FIFO within a lane.

use crate::models::EmailPriority;

/// One of the two priority-partitioned lists in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueLane {
    Normal,
    High,
}

impl QueueLane {
    /// List key for normal- and low-priority jobs.
    pub const NORMAL_KEY: &'static str = "email_queue";

    /// List key for high-priority jobs.
    pub const HIGH_KEY: &'static str = "email_queue_high";

    /// The store key backing this lane.
    pub fn key(&self) -> &'static str {
        match self {
            QueueLane::Normal => Self::NORMAL_KEY,
            QueueLane::High => Self::HIGH_KEY,
        }
    }

    /// Lane for a job priority. High priority gets its own list; everything
    /// else shares the normal lane.
    pub fn for_priority(priority: EmailPriority) -> Self {
        match priority {
            EmailPriority::High => QueueLane::High,
            _ => QueueLane::Normal,
        }
    }

    /// Both lanes, high first. Consumers wanting strict priority pop keys
    /// in this order.
    pub fn poll_order() -> [QueueLane; 2] {
        [QueueLane::High, QueueLane::Normal]
    }
}

impl std::fmt::Display for QueueLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
