use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::child::Child;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ChildStorage;

/// Repository for the children roster
#[derive(Clone)]
pub struct ChildRepository {
    db: DbConnection,
}

impl ChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child(&self, child: &Child) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO children (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&child.id)
        .bind(&child.name)
        .bind(child.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM children
            WHERE id = ?
            "#,
        )
        .bind(child_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Child {
                id: r.try_get("id")?,
                name: r.try_get("name")?,
                created_at: r.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM children
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut children = Vec::with_capacity(rows.len());
        for row in rows {
            children.push(Child {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(children)
    }
}
