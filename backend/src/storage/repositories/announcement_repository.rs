use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::AnnouncementType;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::models::announcement::{Announcement, NewAnnouncement};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{unique_ids, MAX_IDS_PER_STATEMENT};
use crate::storage::traits::AnnouncementStorage;

const SELECT_COLUMNS: &str = "SELECT id, title, content, announcement_type, is_active, visibility_days, created_at FROM announcements";

/// Repository for announcements
#[derive(Clone)]
pub struct AnnouncementRepository {
    db: DbConnection,
}

impl AnnouncementRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Announcement> {
        let announcement_type: String = row.try_get("announcement_type")?;
        Ok(Announcement {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            announcement_type: announcement_type
                .parse::<AnnouncementType>()
                .context("Corrupt announcement_type column")?,
            is_active: row.try_get("is_active")?,
            visibility_days: row.try_get("visibility_days")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AnnouncementStorage for AnnouncementRepository {
    async fn create_announcement(&self, announcement: &NewAnnouncement) -> Result<Announcement> {
        let result = sqlx::query(
            r#"
            INSERT INTO announcements (title, content, announcement_type, is_active, visibility_days, created_at)
            VALUES (?, ?, ?, TRUE, ?, ?)
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.announcement_type.as_str())
        .bind(announcement.visibility_days)
        .bind(announcement.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(Announcement {
            id: result.last_insert_rowid(),
            title: announcement.title.clone(),
            content: announcement.content.clone(),
            announcement_type: announcement.announcement_type,
            is_active: true,
            visibility_days: announcement.visibility_days,
            created_at: announcement.created_at,
        })
    }

    async fn get_announcement(&self, announcement_id: i64) -> Result<Option<Announcement>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(announcement_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_active_announcements(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query(&format!(
            "{} WHERE is_active = TRUE ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn list_expiring_announcements(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query(&format!(
            "{} WHERE visibility_days IS NOT NULL ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn delete_announcements(&self, announcement_ids: &[i64]) -> Result<u64> {
        if announcement_ids.is_empty() {
            return Ok(0);
        }

        let ids = unique_ids(announcement_ids);
        let mut tx = self.db.pool().begin().await?;
        let mut deleted = 0;

        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("DELETE FROM announcements WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            deleted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn setup_test() -> AnnouncementRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AnnouncementRepository::new(db)
    }

    fn new_announcement(title: &str, visibility_days: Option<i64>) -> NewAnnouncement {
        NewAnnouncement {
            title: title.to_string(),
            content: "Details".to_string(),
            announcement_type: AnnouncementType::Event,
            visibility_days,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_announcement() {
        let repo = setup_test().await;
        let created = repo
            .create_announcement(&new_announcement("Picnic", Some(3)))
            .await
            .expect("Failed to create");

        let fetched = repo.get_announcement(created.id).await.expect("Query failed");
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_list_expiring_skips_permanent() {
        let repo = setup_test().await;
        repo.create_announcement(&new_announcement("Permanent", None)).await.unwrap();
        let expiring = repo.create_announcement(&new_announcement("Windowed", Some(1))).await.unwrap();

        let listed = repo.list_expiring_announcements().await.expect("Query failed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, expiring.id);
    }

    #[tokio::test]
    async fn test_list_active_newest_first() {
        let repo = setup_test().await;
        let mut older = new_announcement("Older", None);
        older.created_at = Utc::now() - Duration::days(2);
        repo.create_announcement(&older).await.unwrap();
        repo.create_announcement(&new_announcement("Newer", None)).await.unwrap();

        let titles: Vec<String> = repo
            .list_active_announcements()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Newer".to_string(), "Older".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = setup_test().await;
        let a = repo.create_announcement(&new_announcement("A", Some(1))).await.unwrap();
        let b = repo.create_announcement(&new_announcement("B", Some(1))).await.unwrap();

        let first = repo.delete_announcements(&[a.id, b.id]).await.expect("Delete failed");
        assert_eq!(first, 2);

        let second = repo.delete_announcements(&[a.id, b.id]).await.expect("Delete failed");
        assert_eq!(second, 0);

        assert_eq!(repo.delete_announcements(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_more_ids_than_one_statement_can_bind() {
        let repo = setup_test().await;
        let a = repo.create_announcement(&new_announcement("A", Some(1))).await.unwrap();
        let b = repo.create_announcement(&new_announcement("B", Some(1))).await.unwrap();

        let mut ids: Vec<i64> = (10_000..50_000).collect();
        ids.extend([a.id, b.id, a.id]);

        let deleted = repo.delete_announcements(&ids).await.expect("Large delete failed");
        assert_eq!(deleted, 2);
        assert!(repo.get_announcement(a.id).await.unwrap().is_none());
    }
}
