use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;

use crate::domain::models::message::{BroadcastMessage, NewBroadcastMessage, Notification};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{unique_ids, MAX_IDS_PER_STATEMENT};
use crate::storage::traits::NotificationStorage;

/// Repository for broadcast messages and their per-recipient notifications
#[derive(Clone)]
pub struct NotificationRepository {
    db: DbConnection,
}

impl NotificationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_notification(row: &SqliteRow) -> Result<Notification> {
        Ok(Notification {
            id: row.try_get("id")?,
            activity_id: row.try_get("activity_id")?,
            parent_email: row.try_get("parent_email")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl NotificationStorage for NotificationRepository {
    async fn create_broadcast(
        &self,
        message: &NewBroadcastMessage,
    ) -> Result<(BroadcastMessage, Vec<Notification>)> {
        let recipients_json = serde_json::to_string(&message.recipients)?;
        let attachments_json = serde_json::to_string(&message.attachments)?;

        // Dropping the transaction without commit rolls everything back
        let mut tx = self.db.pool().begin().await?;

        let message_id = sqlx::query(
            r#"
            INSERT INTO broadcast_messages (subject, description, recipients, attachments, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.subject)
        .bind(&message.description)
        .bind(&recipients_json)
        .bind(&attachments_json)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut notifications = Vec::with_capacity(message.recipients.len());
        for email in &message.recipients {
            let notification_id = sqlx::query(
                r#"
                INSERT INTO notifications (activity_id, parent_email, is_read, created_at)
                VALUES (?, ?, FALSE, ?)
                "#,
            )
            .bind(message_id)
            .bind(email)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            notifications.push(Notification {
                id: notification_id,
                activity_id: message_id,
                parent_email: email.clone(),
                is_read: false,
                created_at: message.created_at,
            });
        }

        tx.commit().await?;
        debug!(
            "Stored broadcast message {} with {} notifications",
            message_id,
            notifications.len()
        );

        let stored = BroadcastMessage {
            id: message_id,
            subject: message.subject.clone(),
            description: message.description.clone(),
            recipients: message.recipients.clone(),
            attachments: message.attachments.clone(),
            created_at: message.created_at,
        };
        Ok((stored, notifications))
    }

    async fn mark_notifications_read(&self, notification_ids: &[i64]) -> Result<u64> {
        if notification_ids.is_empty() {
            return Ok(0);
        }

        let ids = unique_ids(notification_ids);
        let mut tx = self.db.pool().begin().await?;
        let mut updated = 0;

        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("UPDATE notifications SET is_read = TRUE WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            updated += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }

    async fn list_notifications_for(&self, parent_email: &str) -> Result<Vec<Notification>> {
        let rows = sqlx::query(
            r#"
            SELECT id, activity_id, parent_email, is_read, created_at
            FROM notifications
            WHERE parent_email = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(parent_email)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_notification).collect()
    }

    async fn delete_notification(&self, notification_id: i64, parent_email: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications WHERE id = ? AND parent_email = ?
            "#,
        )
        .bind(notification_id)
        .bind(parent_email)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
