use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::AttendanceStatus;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::attendance::{AttendanceRecord, NewAttendanceRecord};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AttendanceStorage;

const SELECT_COLUMNS: &str = "SELECT id, child_id, status, check_in_time, check_out_time, brought_by, taken_by, created_at FROM attendance_records";

/// Repository for attendance records
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<AttendanceRecord> {
        let status: String = row.try_get("status")?;
        Ok(AttendanceRecord {
            id: row.try_get("id")?,
            child_id: row.try_get("child_id")?,
            status: status
                .parse::<AttendanceStatus>()
                .context("Corrupt status column in attendance_records")?,
            check_in_time: row.try_get("check_in_time")?,
            check_out_time: row.try_get("check_out_time")?,
            brought_by: row.try_get("brought_by")?,
            taken_by: row.try_get("taken_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn create_attendance(&self, record: &NewAttendanceRecord) -> Result<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_records (child_id, status, check_in_time, brought_by, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.child_id)
        .bind(record.status.as_str())
        .bind(record.check_in_time)
        .bind(&record.brought_by)
        .bind(record.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(AttendanceRecord {
            id: result.last_insert_rowid(),
            child_id: record.child_id.clone(),
            status: record.status,
            check_in_time: Some(record.check_in_time),
            check_out_time: None,
            brought_by: record.brought_by.clone(),
            taken_by: None,
            created_at: record.created_at,
        })
    }

    async fn get_attendance(&self, attendance_id: i64) -> Result<Option<AttendanceRecord>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(attendance_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn record_check_out(
        &self,
        attendance_id: i64,
        check_out_time: DateTime<Utc>,
        taken_by: Option<&str>,
    ) -> Result<Option<AttendanceRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET check_out_time = ?, taken_by = ?
            WHERE id = ?
            "#,
        )
        .bind(check_out_time)
        .bind(taken_by)
        .bind(attendance_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_attendance(attendance_id).await
    }

    async fn list_checked_in_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(&format!(
            "{} WHERE check_in_time >= ? AND check_in_time < ? ORDER BY check_in_time ASC, id ASC",
            SELECT_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }
}
