use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::commands::announcements::{
    AnnouncementReadStatus, MarkViewedCommand, MarkViewedResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::announcement::{Announcement, ViewerIdentity};
use crate::storage::traits::{AnnouncementStorage, AnnouncementViewStorage};
use crate::storage::{AnnouncementRepository, AnnouncementViewRepository, DbConnection};

/// Tracks which viewers have seen which announcements.
///
/// A viewer is identified by user id, email, or both; a stored view counts for
/// an identity when either field matches. Anonymous viewers are never tracked
/// and see every announcement as unread.
#[derive(Clone)]
pub struct ViewTracker {
    views: Arc<dyn AnnouncementViewStorage>,
    announcements: Arc<dyn AnnouncementStorage>,
}

impl ViewTracker {
    pub fn new(db: DbConnection) -> Self {
        Self::with_storage(
            Arc::new(AnnouncementViewRepository::new(db.clone())),
            Arc::new(AnnouncementRepository::new(db)),
        )
    }

    pub fn with_storage(
        views: Arc<dyn AnnouncementViewStorage>,
        announcements: Arc<dyn AnnouncementStorage>,
    ) -> Self {
        Self {
            views,
            announcements,
        }
    }

    /// Record a view. Returns `created: false` when the viewer already has a
    /// view for this announcement, or when the viewer is anonymous.
    pub async fn mark_viewed(&self, command: MarkViewedCommand) -> DomainResult<MarkViewedResult> {
        if command.identity.is_anonymous() {
            debug!(
                "Ignoring anonymous view of announcement {}",
                command.announcement_id
            );
            return Ok(MarkViewedResult { created: false });
        }

        if self
            .announcements
            .get_announcement(command.announcement_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(
                "Announcement",
                command.announcement_id,
            ));
        }

        let created = self
            .views
            .insert_view_if_absent(command.announcement_id, &command.identity, Utc::now())
            .await?;

        if created {
            info!(
                "Recorded view of announcement {} by {:?}",
                command.announcement_id, command.identity
            );
        }
        Ok(MarkViewedResult { created })
    }

    /// Number of `announcement_ids` the viewer has not seen
    pub async fn count_unviewed(
        &self,
        identity: &ViewerIdentity,
        announcement_ids: &[i64],
    ) -> DomainResult<usize> {
        let viewed = self.viewed_ids(identity).await?;
        let unique: HashSet<i64> = announcement_ids.iter().copied().collect();

        Ok(unique.iter().filter(|id| !viewed.contains(id)).count())
    }

    /// Pair each announcement with whether the viewer has seen it, keeping order
    pub async fn with_read_status(
        &self,
        identity: &ViewerIdentity,
        announcements: Vec<Announcement>,
    ) -> DomainResult<Vec<AnnouncementReadStatus>> {
        let viewed = self.viewed_ids(identity).await?;

        Ok(announcements
            .into_iter()
            .map(|announcement| {
                let is_read = viewed.contains(&announcement.id);
                AnnouncementReadStatus {
                    announcement,
                    is_read,
                }
            })
            .collect())
    }

    async fn viewed_ids(&self, identity: &ViewerIdentity) -> DomainResult<HashSet<i64>> {
        if identity.is_anonymous() {
            return Ok(HashSet::new());
        }

        let views = self.views.list_views_for(identity).await?;
        Ok(views
            .iter()
            .filter(|view| identity.matches(view))
            .map(|view| view.announcement_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::announcement::NewAnnouncement;
    use shared::AnnouncementType;

    async fn setup_test() -> (ViewTracker, AnnouncementRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (ViewTracker::new(db.clone()), AnnouncementRepository::new(db))
    }

    async fn seed(repo: &AnnouncementRepository, title: &str) -> Announcement {
        repo.create_announcement(&NewAnnouncement {
            title: title.to_string(),
            content: "Body".to_string(),
            announcement_type: AnnouncementType::Event,
            visibility_days: None,
            created_at: Utc::now(),
        })
        .await
        .expect("Failed to seed announcement")
    }

    fn identity(user_id: Option<&str>, user_email: Option<&str>) -> ViewerIdentity {
        ViewerIdentity::new(user_id.map(str::to_string), user_email.map(str::to_string))
    }

    fn mark(announcement_id: i64, identity: ViewerIdentity) -> MarkViewedCommand {
        MarkViewedCommand {
            announcement_id,
            identity,
        }
    }

    #[tokio::test]
    async fn test_mark_viewed_is_idempotent() {
        let (tracker, repo) = setup_test().await;
        let a = seed(&repo, "Picture day").await;
        let viewer = identity(Some("u1"), None);

        let first = tracker.mark_viewed(mark(a.id, viewer.clone())).await.unwrap();
        let second = tracker.mark_viewed(mark(a.id, viewer.clone())).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(tracker.count_unviewed(&viewer, &[a.id]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_view_matches_on_email_alone() {
        let (tracker, repo) = setup_test().await;
        let a = seed(&repo, "Picture day").await;

        tracker
            .mark_viewed(mark(a.id, identity(Some("u1"), Some("p@example.com"))))
            .await
            .unwrap();

        let by_email = identity(None, Some("p@example.com"));
        assert_eq!(tracker.count_unviewed(&by_email, &[a.id]).await.unwrap(), 0);

        // Same email under a new user id is still the same viewer
        let result = tracker
            .mark_viewed(mark(a.id, identity(Some("u2"), Some("p@example.com"))))
            .await
            .unwrap();
        assert!(!result.created);
    }

    #[tokio::test]
    async fn test_anonymous_viewer_is_not_tracked() {
        let (tracker, repo) = setup_test().await;
        let a = seed(&repo, "Picture day").await;
        let b = seed(&repo, "Closure").await;

        let result = tracker.mark_viewed(mark(a.id, ViewerIdentity::anonymous())).await.unwrap();
        assert!(!result.created);

        let anonymous = ViewerIdentity::anonymous();
        assert_eq!(tracker.count_unviewed(&anonymous, &[a.id, b.id]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_viewed_unknown_announcement() {
        let (tracker, _) = setup_test().await;

        let err = tracker
            .mark_viewed(mark(424_242, identity(Some("u1"), None)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_unviewed_and_read_status() {
        let (tracker, repo) = setup_test().await;
        let a = seed(&repo, "One").await;
        let b = seed(&repo, "Two").await;
        let c = seed(&repo, "Three").await;
        let viewer = identity(Some("u1"), None);

        tracker.mark_viewed(mark(b.id, viewer.clone())).await.unwrap();
        // Someone else's view does not count
        tracker.mark_viewed(mark(c.id, identity(Some("u9"), None))).await.unwrap();

        assert_eq!(tracker.count_unviewed(&viewer, &[a.id, b.id, c.id]).await.unwrap(), 2);
        assert_eq!(tracker.count_unviewed(&viewer, &[a.id, a.id]).await.unwrap(), 1);
        assert_eq!(tracker.count_unviewed(&viewer, &[]).await.unwrap(), 0);

        let statuses = tracker
            .with_read_status(&viewer, vec![c.clone(), b.clone(), a.clone()])
            .await
            .unwrap();
        let flags: Vec<(i64, bool)> = statuses.iter().map(|s| (s.announcement.id, s.is_read)).collect();
        assert_eq!(flags, vec![(c.id, false), (b.id, true), (a.id, false)]);
    }

    #[tokio::test]
    async fn test_concurrent_first_views_create_one_record() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite:{}", dir.path().join("views.db").display());
        let db = DbConnection::new(&url).await.expect("Failed to open database");
        let tracker = ViewTracker::new(db.clone());
        let repo = AnnouncementRepository::new(db.clone());
        let a = seed(&repo, "Picture day").await;
        let viewer = identity(Some("u1"), Some("p@example.com"));

        let (first, second) = tokio::join!(
            tracker.mark_viewed(mark(a.id, viewer.clone())),
            tracker.mark_viewed(mark(a.id, viewer.clone()))
        );
        let created = [first.unwrap().created, second.unwrap().created];
        assert_eq!(created.iter().filter(|c| **c).count(), 1);

        let views = AnnouncementViewRepository::new(db).list_views_for(&viewer).await.unwrap();
        assert_eq!(views.len(), 1);
    }
}
