use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::notifications::{
    BroadcastCommand, BroadcastResult, MarkReadCommand, MarkReadResult, NotificationListResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::message::NewBroadcastMessage;
use crate::storage::traits::NotificationStorage;
use crate::storage::{DbConnection, NotificationRepository};

/// Service fanning broadcast messages out to per-recipient notifications
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStorage>,
}

impl NotificationService {
    pub fn new(db: DbConnection) -> Self {
        Self::with_storage(Arc::new(NotificationRepository::new(db)))
    }

    pub fn with_storage(notifications: Arc<dyn NotificationStorage>) -> Self {
        Self { notifications }
    }

    /// Store a message and create one unread notification per recipient entry.
    /// Duplicate entries each get their own notification.
    pub async fn broadcast(&self, command: BroadcastCommand) -> DomainResult<BroadcastResult> {
        info!(
            "Broadcasting message '{}' to {} recipients",
            command.subject,
            command.recipients.len()
        );

        let recipients = Self::validate_recipients(&command.recipients)?;
        if command.subject.trim().is_empty() {
            return Err(DomainError::invalid("Message subject cannot be empty"));
        }

        let recipients_requested = recipients.len();
        let (message, notifications) = self
            .notifications
            .create_broadcast(&NewBroadcastMessage {
                subject: command.subject.trim().to_string(),
                description: command.description,
                recipients,
                attachments: command.attachments,
                created_at: Utc::now(),
            })
            .await?;

        let notifications_created = notifications.len();
        if notifications_created != recipients_requested {
            warn!(
                "Broadcast {} created {} notifications for {} recipients",
                message.id, notifications_created, recipients_requested
            );
        }

        info!(
            "Broadcast message {} delivered to {} recipients",
            message.id, notifications_created
        );
        Ok(BroadcastResult {
            message,
            notifications,
            recipients_requested,
            notifications_created,
        })
    }

    /// Mark notifications read. Unknown ids are ignored and not counted.
    pub async fn mark_read(&self, command: MarkReadCommand) -> DomainResult<MarkReadResult> {
        if command.notification_ids.is_empty() {
            return Ok(MarkReadResult { updated_count: 0 });
        }

        let updated_count = self
            .notifications
            .mark_notifications_read(&command.notification_ids)
            .await?;

        info!(
            "Marked {} of {} notifications read",
            updated_count,
            command.notification_ids.len()
        );
        Ok(MarkReadResult { updated_count })
    }

    /// A recipient's notifications, newest first
    pub async fn notifications_for(&self, parent_email: &str) -> DomainResult<NotificationListResult> {
        let email = parent_email.trim();
        if email.is_empty() {
            return Err(DomainError::invalid("Email cannot be empty"));
        }

        let notifications = self.notifications.list_notifications_for(email).await?;
        let unread_count = notifications.iter().filter(|n| !n.is_read).count();

        Ok(NotificationListResult {
            notifications,
            unread_count,
        })
    }

    /// Delete a notification, but only on behalf of its recipient
    pub async fn delete_notification(&self, notification_id: i64, parent_email: &str) -> DomainResult<()> {
        let email = parent_email.trim();
        if email.is_empty() {
            return Err(DomainError::invalid("Email cannot be empty"));
        }

        if !self.notifications.delete_notification(notification_id, email).await? {
            return Err(DomainError::not_found("Notification", notification_id));
        }

        info!("Deleted notification {} for {}", notification_id, email);
        Ok(())
    }

    fn validate_recipients(recipients: &[String]) -> DomainResult<Vec<String>> {
        if recipients.is_empty() {
            return Err(DomainError::invalid("Recipient list cannot be empty"));
        }

        recipients
            .iter()
            .map(|recipient| {
                let email = recipient.trim();
                if email.is_empty() || !email.contains('@') {
                    Err(DomainError::invalid(format!(
                        "Invalid recipient address: '{}'",
                        recipient
                    )))
                } else {
                    Ok(email.to_string())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    async fn setup_test() -> (NotificationService, DbConnection) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (NotificationService::new(db.clone()), db)
    }

    fn broadcast(recipients: &[&str]) -> BroadcastCommand {
        BroadcastCommand {
            subject: "Field trip".to_string(),
            description: Some("Zoo on Thursday".to_string()),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            attachments: Vec::new(),
        }
    }

    async fn count(db: &DbConnection, table: &str) -> i64 {
        sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("n")
    }

    #[tokio::test]
    async fn test_broadcast_creates_one_notification_per_entry() {
        let (service, _) = setup_test().await;

        let result = service
            .broadcast(broadcast(&["a@example.com", "b@example.com", "a@example.com"]))
            .await
            .expect("Broadcast failed");

        assert_eq!(result.recipients_requested, 3);
        assert_eq!(result.notifications_created, 3);
        assert!(result
            .notifications
            .iter()
            .all(|n| n.activity_id == result.message.id && !n.is_read));

        let for_a = service.notifications_for("a@example.com").await.unwrap();
        assert_eq!(for_a.notifications.len(), 2);
        assert_eq!(for_a.unread_count, 2);
    }

    #[tokio::test]
    async fn test_rejected_broadcast_writes_nothing() {
        let (service, db) = setup_test().await;

        for recipients in [vec![], vec!["a@example.com", "  "], vec!["not-an-address"]] {
            let err = service.broadcast(broadcast(&recipients)).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }

        let mut blank_subject = broadcast(&["a@example.com"]);
        blank_subject.subject = " ".to_string();
        assert!(service.broadcast(blank_subject).await.is_err());

        assert_eq!(count(&db, "broadcast_messages").await, 0);
        assert_eq!(count(&db, "notifications").await, 0);
    }

    #[tokio::test]
    async fn test_mark_read_counts_existing_only() {
        let (service, _) = setup_test().await;
        let result = service
            .broadcast(broadcast(&["a@example.com", "b@example.com"]))
            .await
            .unwrap();
        let v1 = result.notifications[0].id;
        let v2 = result.notifications[1].id;

        let marked = service
            .mark_read(MarkReadCommand {
                notification_ids: vec![v1, 999_999, v2],
            })
            .await
            .unwrap();
        assert_eq!(marked.updated_count, 2);

        let none = service
            .mark_read(MarkReadCommand {
                notification_ids: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(none.updated_count, 0);

        let for_a = service.notifications_for("a@example.com").await.unwrap();
        assert_eq!(for_a.unread_count, 0);
    }

    #[tokio::test]
    async fn test_mark_read_with_huge_batch_of_unknown_ids() {
        let (service, _) = setup_test().await;
        let result = service.broadcast(broadcast(&["a@example.com"])).await.unwrap();
        let valid = result.notifications[0].id;

        let mut notification_ids: Vec<i64> = (1_000_000..1_040_000).collect();
        notification_ids.push(valid);
        notification_ids.push(valid);

        let marked = service
            .mark_read(MarkReadCommand { notification_ids })
            .await
            .expect("Large batch should not fail");
        assert_eq!(marked.updated_count, 1);

        let for_a = service.notifications_for("a@example.com").await.unwrap();
        assert_eq!(for_a.unread_count, 0);
    }

    #[tokio::test]
    async fn test_failed_fan_out_leaves_no_rows() {
        let (service, db) = setup_test().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_blocked_recipient
            BEFORE INSERT ON notifications
            WHEN NEW.parent_email = 'blocked@example.com'
            BEGIN
                SELECT RAISE(ABORT, 'recipient rejected');
            END;
            "#,
        )
        .execute(db.pool())
        .await
        .expect("Failed to install trigger");

        let err = service
            .broadcast(broadcast(&["a@example.com", "blocked@example.com"]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
        assert_eq!(err.kind(), "store_unavailable");

        assert_eq!(count(&db, "broadcast_messages").await, 0);
        assert_eq!(count(&db, "notifications").await, 0);
    }

    #[tokio::test]
    async fn test_delete_notification_checks_owner() {
        let (service, _) = setup_test().await;
        let result = service.broadcast(broadcast(&["a@example.com"])).await.unwrap();
        let id = result.notifications[0].id;

        let err = service.delete_notification(id, "b@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        service.delete_notification(id, "a@example.com").await.unwrap();
        assert!(service
            .notifications_for("a@example.com")
            .await
            .unwrap()
            .notifications
            .is_empty());
    }

    #[tokio::test]
    async fn test_notifications_for_requires_email() {
        let (service, _) = setup_test().await;
        let err = service.notifications_for("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
