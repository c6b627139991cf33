use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::commands::announcements::{CreateAnnouncementCommand, SweepResult};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::announcement::{Announcement, NewAnnouncement};
use crate::domain::visibility::{is_visible, sweep_expired};
use crate::storage::traits::AnnouncementStorage;
use crate::storage::{AnnouncementRepository, DbConnection};

/// Service for announcement visibility and expiry
#[derive(Clone)]
pub struct AnnouncementService {
    announcements: Arc<dyn AnnouncementStorage>,
}

impl AnnouncementService {
    pub fn new(db: DbConnection) -> Self {
        Self::with_storage(Arc::new(AnnouncementRepository::new(db)))
    }

    pub fn with_storage(announcements: Arc<dyn AnnouncementStorage>) -> Self {
        Self { announcements }
    }

    /// Create a new announcement
    pub async fn create_announcement(
        &self,
        command: CreateAnnouncementCommand,
    ) -> DomainResult<Announcement> {
        info!("Creating announcement: {}", command.title);

        self.validate_create_command(&command)?;

        let announcement = self
            .announcements
            .create_announcement(&NewAnnouncement {
                title: command.title.trim().to_string(),
                content: command.content.trim().to_string(),
                announcement_type: command.announcement_type,
                visibility_days: command.visibility_days,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            "Created announcement {} (visibility_days: {:?})",
            announcement.id, announcement.visibility_days
        );
        Ok(announcement)
    }

    /// Active announcements that have not expired at `now`, newest first.
    /// Expired rows are filtered out here and left for the sweeper to delete.
    pub async fn list_visible(&self, now: DateTime<Utc>) -> DomainResult<Vec<Announcement>> {
        let active = self.announcements.list_active_announcements().await?;
        let total = active.len();

        let visible: Vec<Announcement> = active.into_iter().filter(|a| is_visible(a, now)).collect();

        debug!("{} of {} active announcements visible", visible.len(), total);
        Ok(visible)
    }

    /// Delete every announcement whose visibility window has passed at `now`.
    ///
    /// Safe to run concurrently with itself: a row deleted by another sweep is
    /// simply not counted here.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> DomainResult<SweepResult> {
        let candidates = self.announcements.list_expiring_announcements().await?;
        let expired_ids = sweep_expired(&candidates, now);

        if expired_ids.is_empty() {
            debug!("Expiry sweep found nothing to delete");
            return Ok(SweepResult::default());
        }

        let deleted_count = self.announcements.delete_announcements(&expired_ids).await?;
        info!(
            "Expiry sweep deleted {} of {} expired announcements: {:?}",
            deleted_count,
            expired_ids.len(),
            expired_ids
        );

        Ok(SweepResult {
            expired_ids,
            deleted_count,
        })
    }

    fn validate_create_command(&self, command: &CreateAnnouncementCommand) -> DomainResult<()> {
        if command.title.trim().is_empty() {
            return Err(DomainError::invalid("Announcement title cannot be empty"));
        }
        if command.content.trim().is_empty() {
            return Err(DomainError::invalid("Announcement content cannot be empty"));
        }
        if let Some(days) = command.visibility_days {
            if days < 0 {
                return Err(DomainError::invalid("Visibility days cannot be negative"));
            }
        }
        Ok(())
    }
}
