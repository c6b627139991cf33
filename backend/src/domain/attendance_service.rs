use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::absence::derive_absent;
use crate::domain::commands::attendance::{
    CheckInCommand, CheckOutCommand, DailyAttendanceQuery, DailyAttendanceResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::attendance::{AttendancePolicy, AttendanceRecord, NewAttendanceRecord};
use crate::storage::traits::{AttendanceStorage, ChildStorage};
use crate::storage::{AttendanceRepository, ChildRepository, DbConnection};

/// Service classifying check-ins and recording check-outs
#[derive(Clone)]
pub struct AttendanceService {
    attendance: Arc<dyn AttendanceStorage>,
    children: Arc<dyn ChildStorage>,
    policy: AttendancePolicy,
}

impl AttendanceService {
    /// Create a new AttendanceService backed by SQLite
    pub fn new(db: DbConnection, policy: AttendancePolicy) -> Self {
        Self::with_storage(
            Arc::new(AttendanceRepository::new(db.clone())),
            Arc::new(ChildRepository::new(db)),
            policy,
        )
    }

    pub fn with_storage(
        attendance: Arc<dyn AttendanceStorage>,
        children: Arc<dyn ChildStorage>,
        policy: AttendancePolicy,
    ) -> Self {
        Self {
            attendance,
            children,
            policy,
        }
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Check a child in, classifying the record as present or late
    pub async fn check_in(&self, command: CheckInCommand) -> DomainResult<AttendanceRecord> {
        info!("Checking in child: {}", command.child_id);

        if self.children.get_child(&command.child_id).await?.is_none() {
            warn!("Check-in rejected, child not found: {}", command.child_id);
            return Err(DomainError::not_found("Child", &command.child_id));
        }

        let now = Utc::now();
        let check_in_time = command.timestamp.unwrap_or(now);
        let status = self.policy.classify(check_in_time);

        // Repeated check-ins on the same day are kept as separate records
        let record = self
            .attendance
            .create_attendance(&NewAttendanceRecord {
                child_id: command.child_id,
                status,
                check_in_time,
                brought_by: command.brought_by,
                created_at: now,
            })
            .await?;

        info!(
            "Checked in child {} at {} as {} (record {})",
            record.child_id, check_in_time, status, record.id
        );
        Ok(record)
    }

    /// Record check-out on an existing attendance record. Calling it again
    /// overwrites the previous check-out.
    pub async fn check_out(&self, command: CheckOutCommand) -> DomainResult<AttendanceRecord> {
        info!("Checking out attendance record: {}", command.attendance_id);

        let existing = self
            .attendance
            .get_attendance(command.attendance_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendance record", command.attendance_id))?;

        let check_in_time = existing.check_in_time.ok_or_else(|| {
            DomainError::invalid(format!(
                "Attendance record {} has no check-in time",
                command.attendance_id
            ))
        })?;

        let check_out_time = command.timestamp.unwrap_or_else(Utc::now);
        if check_out_time < check_in_time {
            return Err(DomainError::invalid(format!(
                "Check-out time {} is before check-in time {}",
                check_out_time, check_in_time
            )));
        }

        if existing.check_out_time.is_some() {
            warn!(
                "Attendance record {} already checked out, overwriting",
                command.attendance_id
            );
        }

        let record = self
            .attendance
            .record_check_out(command.attendance_id, check_out_time, command.taken_by.as_deref())
            .await?
            .ok_or_else(|| DomainError::not_found("Attendance record", command.attendance_id))?;

        info!("Checked out record {} at {}", record.id, check_out_time);
        Ok(record)
    }

    /// All check-ins on a site-local day, optionally with the children who
    /// have none
    pub async fn daily_attendance(
        &self,
        query: DailyAttendanceQuery,
    ) -> DomainResult<DailyAttendanceResult> {
        info!(
            "Listing attendance for {} (include_absent: {})",
            query.date, query.include_absent
        );

        let (start, end) = self.policy.day_bounds(query.date);
        let records = self.attendance.list_checked_in_between(start, end).await?;

        let absent_child_ids = if query.include_absent {
            let roster = self.children.list_children().await?;
            let absent = derive_absent(
                roster.iter().map(|c| c.id.as_str()),
                records.iter().map(|r| r.child_id.as_str()),
            );
            info!("{} of {} children absent on {}", absent.len(), roster.len(), query.date);
            Some(absent)
        } else {
            None
        };

        Ok(DailyAttendanceResult {
            date: query.date,
            records,
            absent_child_ids,
        })
    }
}
