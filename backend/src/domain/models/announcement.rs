use chrono::{DateTime, Utc};
use shared::AnnouncementType;

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub is_active: bool,
    /// None means the announcement never expires
    pub visibility_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub visibility_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// "This viewer has seen this announcement"
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementView {
    pub id: i64,
    pub announcement_id: i64,
    pub viewer_id: Option<String>,
    pub viewer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Who is looking at announcements. Either field may be missing; with both
/// missing the viewer is anonymous and cannot be tracked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerIdentity {
    user_id: Option<String>,
    user_email: Option<String>,
}

impl ViewerIdentity {
    /// Blank values are treated as absent
    pub fn new(user_id: Option<String>, user_email: Option<String>) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            user_id: clean(user_id),
            user_email: clean(user_email),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && self.user_email.is_none()
    }

    /// A view belongs to this identity when either supplied field matches
    pub fn matches(&self, view: &AnnouncementView) -> bool {
        let id_matches = matches!(
            (self.user_id(), view.viewer_id.as_deref()),
            (Some(mine), Some(theirs)) if mine == theirs
        );
        let email_matches = matches!(
            (self.user_email(), view.viewer_email.as_deref()),
            (Some(mine), Some(theirs)) if mine == theirs
        );
        id_matches || email_matches
    }
}
