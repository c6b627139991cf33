use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::domain::models::announcement::{AnnouncementView, ViewerIdentity};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AnnouncementViewStorage;

/// Repository for announcement views
#[derive(Clone)]
pub struct AnnouncementViewRepository {
    db: DbConnection,
}

impl AnnouncementViewRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnnouncementViewStorage for AnnouncementViewRepository {
    async fn insert_view_if_absent(
        &self,
        announcement_id: i64,
        identity: &ViewerIdentity,
        viewed_at: DateTime<Utc>,
    ) -> Result<bool> {
        if identity.is_anonymous() {
            return Ok(false);
        }

        // A clash on either partial unique index means "already viewed"
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO announcement_views (announcement_id, viewer_id, viewer_email, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(announcement_id)
        .bind(identity.user_id())
        .bind(identity.user_email())
        .bind(viewed_at)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_views_for(&self, identity: &ViewerIdentity) -> Result<Vec<AnnouncementView>> {
        if identity.is_anonymous() {
            return Ok(Vec::new());
        }

        // NULL never compares equal, so an absent field matches nothing
        let rows = sqlx::query(
            r#"
            SELECT id, announcement_id, viewer_id, viewer_email, created_at
            FROM announcement_views
            WHERE viewer_id = ? OR viewer_email = ?
            ORDER BY id ASC
            "#,
        )
        .bind(identity.user_id())
        .bind(identity.user_email())
        .fetch_all(self.db.pool())
        .await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(AnnouncementView {
                id: row.try_get("id")?,
                announcement_id: row.try_get("announcement_id")?,
                viewer_id: row.try_get("viewer_id")?,
                viewer_email: row.try_get("viewer_email")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(views)
    }
}
