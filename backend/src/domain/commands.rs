// backend/src/domain/commands.rs

//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types, so every
//! field here is already parsed and typed.

pub mod attendance {
    use crate::domain::models::attendance::AttendanceRecord;
    use chrono::{DateTime, NaiveDate, Utc};
    use std::collections::BTreeSet;

    /// Input for checking a child in.
    #[derive(Debug, Clone)]
    pub struct CheckInCommand {
        pub child_id: String,
        /// Defaults to now when absent
        pub timestamp: Option<DateTime<Utc>>,
        pub brought_by: Option<String>,
    }

    /// Input for checking a child out of an existing record.
    #[derive(Debug, Clone)]
    pub struct CheckOutCommand {
        pub attendance_id: i64,
        pub taken_by: Option<String>,
        /// Defaults to now when absent
        pub timestamp: Option<DateTime<Utc>>,
    }

    /// Query for one site-local day of attendance.
    #[derive(Debug, Clone)]
    pub struct DailyAttendanceQuery {
        pub date: NaiveDate,
        pub include_absent: bool,
    }

    /// Result of a daily attendance query.
    #[derive(Debug, Clone)]
    pub struct DailyAttendanceResult {
        pub date: NaiveDate,
        pub records: Vec<AttendanceRecord>,
        /// Only computed when the query asked for absent children
        pub absent_child_ids: Option<BTreeSet<String>>,
    }
}

pub mod announcements {
    use crate::domain::models::announcement::{Announcement, ViewerIdentity};
    use shared::AnnouncementType;

    /// Input for creating an announcement.
    #[derive(Debug, Clone)]
    pub struct CreateAnnouncementCommand {
        pub title: String,
        pub content: String,
        pub announcement_type: AnnouncementType,
        pub visibility_days: Option<i64>,
    }

    /// Input for recording that a viewer saw an announcement.
    #[derive(Debug, Clone)]
    pub struct MarkViewedCommand {
        pub announcement_id: i64,
        pub identity: ViewerIdentity,
    }

    /// Result of recording a view.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MarkViewedResult {
        /// False when the viewer had already seen it, or is anonymous
        pub created: bool,
    }

    /// An announcement annotated with the viewer's read state.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AnnouncementReadStatus {
        pub announcement: Announcement,
        pub is_read: bool,
    }

    /// Result of one expiry sweep.
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct SweepResult {
        pub expired_ids: Vec<i64>,
        pub deleted_count: u64,
    }
}

pub mod notifications {
    use crate::domain::models::message::{BroadcastMessage, Notification};

    /// Input for broadcasting a message to parents.
    #[derive(Debug, Clone)]
    pub struct BroadcastCommand {
        pub subject: String,
        pub description: Option<String>,
        pub recipients: Vec<String>,
        pub attachments: Vec<String>,
    }

    /// Result of a broadcast.
    #[derive(Debug, Clone)]
    pub struct BroadcastResult {
        pub message: BroadcastMessage,
        pub notifications: Vec<Notification>,
        pub recipients_requested: usize,
        pub notifications_created: usize,
    }

    /// Input for marking notifications as read. Ids are already parsed;
    /// malformed ones were dropped at the boundary.
    #[derive(Debug, Clone)]
    pub struct MarkReadCommand {
        pub notification_ids: Vec<i64>,
    }

    /// Result of marking notifications as read.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MarkReadResult {
        pub updated_count: u64,
    }

    /// A recipient's notifications.
    #[derive(Debug, Clone)]
    pub struct NotificationListResult {
        pub notifications: Vec<Notification>,
        pub unread_count: usize,
    }
}
