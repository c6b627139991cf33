use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attendance status of a single check-in record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Checked in at or before the late cutoff
    Present,
    /// Checked in after the late cutoff
    Late,
    /// No check-in for the day (derived, never written on check-in)
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "late" => Ok(AttendanceStatus::Late),
            "absent" => Ok(AttendanceStatus::Absent),
            other => Err(EnumParseError::UnknownAttendanceStatus(other.to_string())),
        }
    }
}

/// Kind of announcement, used by the dashboard for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementType {
    General,
    Important,
    Event,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::General => "general",
            AnnouncementType::Important => "important",
            AnnouncementType::Event => "event",
        }
    }
}

impl Default for AnnouncementType {
    fn default() -> Self {
        AnnouncementType::General
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(AnnouncementType::General),
            "important" => Ok(AnnouncementType::Important),
            "event" => Ok(AnnouncementType::Event),
            other => Err(EnumParseError::UnknownAnnouncementType(other.to_string())),
        }
    }
}

/// Error returned when a stored enum column holds an unexpected value
#[derive(Debug, Clone, PartialEq)]
pub enum EnumParseError {
    UnknownAttendanceStatus(String),
    UnknownAnnouncementType(String),
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumParseError::UnknownAttendanceStatus(s) => write!(f, "Unknown attendance status: {}", s),
            EnumParseError::UnknownAnnouncementType(s) => write!(f, "Unknown announcement type: {}", s),
        }
    }
}

impl std::error::Error for EnumParseError {}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub child_id: String,
    pub status: AttendanceStatus,
    /// Check-in time (RFC 3339)
    pub check_in_time: Option<String>,
    /// Check-out time (RFC 3339)
    pub check_out_time: Option<String>,
    pub brought_by: Option<String>,
    pub taken_by: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub child_id: String,
    /// Optional check-in time override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
    pub brought_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckOutRequest {
    pub taken_by: Option<String>,
    /// Optional check-out time override (RFC 3339) - uses current time if not provided
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub record: AttendanceRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendanceRequest {
    /// Site-local calendar date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub include_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendanceResponse {
    pub date: String,
    pub records: Vec<AttendanceRecord>,
    /// Present only when absent children were requested
    pub absent_child_ids: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub is_active: bool,
    /// Days after creation during which the announcement is shown; None means permanent
    pub visibility_days: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub announcement_type: AnnouncementType,
    pub visibility_days: Option<i64>,
}

/// Viewer identity supplied by the caller; both fields may be absent for anonymous viewers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerQuery {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementWithReadStatus {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementListResponse {
    pub announcements: Vec<AnnouncementWithReadStatus>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkViewedResponse {
    /// True when this call recorded the first view
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Ids found expired by this sweep
    pub expired_ids: Vec<i64>,
    /// Rows actually removed; lower than expired_ids when a concurrent sweep got there first
    pub deleted_count: u64,
}

// ---------------------------------------------------------------------------
// Messages & notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    pub id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub recipients: Vec<String>,
    pub attachments: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub subject: String,
    pub description: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub activity_id: i64,
    pub parent_email: String,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub message: BroadcastMessage,
    pub notifications: Vec<Notification>,
    pub recipients_requested: usize,
    pub notifications_created: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReadRequest {
    /// Raw ids as sent by the client; malformed entries are ignored
    #[serde(default)]
    pub notification_ids: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub updated_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
