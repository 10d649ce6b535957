//! Data models for the mailer domain.

use chrono::{DateTime, Utc};
use rand::RngExt;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Priority of an email job. Selects the queue lane on enqueue.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl std::fmt::Display for EmailPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailPriority::Low => write!(f, "low"),
            EmailPriority::Normal => write!(f, "normal"),
            EmailPriority::High => write!(f, "high"),
        }
    }
}

/// Attachment content, either text or raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttachmentContent {
    Text(String),
    Binary(Vec<u8>),
}

/// A file attached to an email job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub content: AttachmentContent,
    pub content_type: String,
}

/// A deliverable email, queued for asynchronous processing by the worker.
///
/// Serialized to JSON on the wire; field names follow the queue's JSON
/// contract (camelCase, optional fields omitted when absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailJob {
    /// Unique job identifier. Assigned on enqueue when the caller left it
    /// empty; deterministic ids enable store-side deduplication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Optional sender override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Plain-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Ordered attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Queue lane selector.
    #[serde(default)]
    pub priority: EmailPriority,
    /// Requested future-delivery time. Carried on the wire for consumers;
    /// the queue itself performs no time-based gating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Open key-value bag. `createdAt` is injected on enqueue.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl EmailJob {
    /// Create a job with the given recipients and subject. Everything else
    /// starts empty, with normal priority.
    pub fn new(to: Vec<String>, subject: impl Into<String>) -> Self {
        Self {
            id: None,
            to,
            from: None,
            subject: subject.into(),
            html: None,
            text: None,
            attachments: Vec::new(),
            priority: EmailPriority::default(),
            scheduled_at: None,
            metadata: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_body(mut self, html: impl Into<String>, text: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self.text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: EmailPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Generate a time-based job id: `<prefix>_<millis>_<random8>`.
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    format!(
        "{}_{}_{}",
        prefix,
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_defaults_to_normal() {
        let job = EmailJob::new(vec!["a@b.com".to_string()], "Hello");
        assert_eq!(job.priority, EmailPriority::Normal);
        assert!(job.id.is_none());
        assert!(job.metadata.is_empty());
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("email");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "email");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(generate_id("email"), generate_id("email"));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let job = EmailJob::new(vec!["a@b.com".to_string()], "Hello")
            .with_id("job_1")
            .with_body("<p>Hi</p>", "Hi")
            .with_priority(EmailPriority::High);

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["id"], "job_1");
        assert_eq!(value["to"], json!(["a@b.com"]));
        assert_eq!(value["priority"], "high");
        // Absent optionals are omitted entirely
        assert!(value.get("from").is_none());
        assert!(value.get("scheduledAt").is_none());
        assert!(value.get("attachments").is_none());
        // Metadata is always present
        assert!(value.get("metadata").is_some());
    }

    #[test]
    fn test_scheduled_at_serializes_camel_case() {
        let mut job = EmailJob::new(vec!["a@b.com".to_string()], "Hello");
        job.scheduled_at = Some(Utc::now());

        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("scheduledAt").is_some());
        assert!(value.get("scheduled_at").is_none());
    }

    #[test]
    fn test_round_trip_with_attachments() {
        let mut job = EmailJob::new(vec!["a@b.com".to_string()], "Receipt")
            .with_id("receipt_42")
            .with_metadata_entry("type", "receipt");
        job.attachments.push(Attachment {
            filename: "receipt.txt".to_string(),
            content: AttachmentContent::Text("paid".to_string()),
            content_type: "text/plain".to_string(),
        });

        let payload = serde_json::to_string(&job).unwrap();
        let parsed: EmailJob = serde_json::from_str(&payload).unwrap();

        assert_eq!(parsed.id.as_deref(), Some("receipt_42"));
        assert_eq!(parsed.attachments, job.attachments);
        assert_eq!(parsed.metadata["type"], "receipt");
    }

    #[test]
    fn test_deserialize_defaults_missing_priority() {
        let parsed: EmailJob =
            serde_json::from_str(r#"{"to":["a@b.com"],"subject":"Hi"}"#).unwrap();
        assert_eq!(parsed.priority, EmailPriority::Normal);
    }
}
