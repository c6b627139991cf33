use chrono::{DateTime, Utc};

/// A staff message broadcast to a list of parent email addresses
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastMessage {
    pub id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub recipients: Vec<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated message contents ready to be persisted together with its fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct NewBroadcastMessage {
    pub subject: String,
    pub description: Option<String>,
    pub recipients: Vec<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One delivery of a broadcast message to one recipient
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i64,
    /// Id of the broadcast message this notification delivers
    pub activity_id: i64,
    pub parent_email: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
