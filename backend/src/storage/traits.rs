//! # Storage Traits
//!
//! This module defines the record store abstraction the domain services depend
//! on. Each trait covers one record type; services hold them as trait objects
//! so a different backend (or a test double) can be injected.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::announcement::{
    Announcement, AnnouncementView, NewAnnouncement, ViewerIdentity,
};
use crate::domain::models::attendance::{AttendanceRecord, NewAttendanceRecord};
use crate::domain::models::child::Child;
use crate::domain::models::message::{BroadcastMessage, NewBroadcastMessage, Notification};

/// Trait defining the interface for child lookups
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child
    async fn store_child(&self, child: &Child) -> Result<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// List all children ordered by name
    async fn list_children(&self) -> Result<Vec<Child>>;
}

/// Trait defining the interface for attendance record storage
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Insert a classified check-in and return the stored record
    async fn create_attendance(&self, record: &NewAttendanceRecord) -> Result<AttendanceRecord>;

    /// Retrieve a record by ID
    async fn get_attendance(&self, attendance_id: i64) -> Result<Option<AttendanceRecord>>;

    /// Set check-out time and collector on a record.
    /// Returns None if the record does not exist.
    async fn record_check_out(
        &self,
        attendance_id: i64,
        check_out_time: DateTime<Utc>,
        taken_by: Option<&str>,
    ) -> Result<Option<AttendanceRecord>>;

    /// Records whose check-in falls in `[start, end)`, oldest first
    async fn list_checked_in_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>>;
}

/// Trait defining the interface for announcement storage
#[async_trait]
pub trait AnnouncementStorage: Send + Sync {
    async fn create_announcement(&self, announcement: &NewAnnouncement) -> Result<Announcement>;

    async fn get_announcement(&self, announcement_id: i64) -> Result<Option<Announcement>>;

    /// Active announcements, newest first
    async fn list_active_announcements(&self) -> Result<Vec<Announcement>>;

    /// Announcements that carry a visibility window
    async fn list_expiring_announcements(&self) -> Result<Vec<Announcement>>;

    /// Delete announcements by ID.
    /// Returns the number actually deleted; ids already gone are not counted.
    async fn delete_announcements(&self, announcement_ids: &[i64]) -> Result<u64>;
}

/// Trait defining the interface for announcement view storage
#[async_trait]
pub trait AnnouncementViewStorage: Send + Sync {
    /// Atomically insert a view unless one already exists for this
    /// announcement matching the identity's id or email.
    /// Returns true when a row was inserted.
    async fn insert_view_if_absent(
        &self,
        announcement_id: i64,
        identity: &ViewerIdentity,
        viewed_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// All views matching the identity's id or email
    async fn list_views_for(&self, identity: &ViewerIdentity) -> Result<Vec<AnnouncementView>>;
}

/// Trait defining the interface for broadcast message and notification storage
#[async_trait]
pub trait NotificationStorage: Send + Sync {
    /// Persist a message and one notification per recipient entry as a
    /// single unit; either everything is written or nothing is.
    async fn create_broadcast(
        &self,
        message: &NewBroadcastMessage,
    ) -> Result<(BroadcastMessage, Vec<Notification>)>;

    /// Set `is_read` on the given notifications.
    /// Returns the number of notifications that exist among the ids.
    async fn mark_notifications_read(&self, notification_ids: &[i64]) -> Result<u64>;

    /// Notifications addressed to an email, newest first
    async fn list_notifications_for(&self, parent_email: &str) -> Result<Vec<Notification>>;

    /// Delete a notification owned by the given email.
    /// Returns true if it was found and deleted.
    async fn delete_notification(&self, notification_id: i64, parent_email: &str) -> Result<bool>;
}
