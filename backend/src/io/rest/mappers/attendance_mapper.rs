//! backend/src/io/rest/mappers/attendance_mapper.rs

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::commands::attendance::{
    CheckInCommand, CheckOutCommand, DailyAttendanceQuery, DailyAttendanceResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::attendance::AttendanceRecord as DomainAttendanceRecord;
use shared::{
    AttendanceRecord as SharedAttendanceRecord, AttendanceResponse, CheckInRequest,
    CheckOutRequest, DailyAttendanceRequest, DailyAttendanceResponse,
};

/// Mapper to convert between shared attendance DTOs and domain attendance types.
pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_check_in_command(request: CheckInRequest) -> DomainResult<CheckInCommand> {
        let child_id = request.child_id.trim().to_string();
        if child_id.is_empty() {
            return Err(DomainError::invalid("child_id cannot be empty"));
        }

        Ok(CheckInCommand {
            child_id,
            timestamp: parse_optional_timestamp(request.timestamp.as_deref())?,
            brought_by: non_blank(request.brought_by),
        })
    }

    pub fn to_check_out_command(
        attendance_id: i64,
        request: CheckOutRequest,
    ) -> DomainResult<CheckOutCommand> {
        Ok(CheckOutCommand {
            attendance_id,
            taken_by: non_blank(request.taken_by),
            timestamp: parse_optional_timestamp(request.timestamp.as_deref())?,
        })
    }

    pub fn to_daily_query(request: DailyAttendanceRequest) -> DomainResult<DailyAttendanceQuery> {
        let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d").map_err(|e| {
            DomainError::invalid(format!("Invalid date '{}': {}", request.date, e))
        })?;

        Ok(DailyAttendanceQuery {
            date,
            include_absent: request.include_absent,
        })
    }

    /// Converts a domain attendance record to a shared DTO.
    pub fn to_dto(domain: DomainAttendanceRecord) -> SharedAttendanceRecord {
        SharedAttendanceRecord {
            id: domain.id,
            child_id: domain.child_id,
            status: domain.status,
            check_in_time: domain.check_in_time.map(|t| t.to_rfc3339()),
            check_out_time: domain.check_out_time.map(|t| t.to_rfc3339()),
            brought_by: domain.brought_by,
            taken_by: domain.taken_by,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_attendance_response(domain: DomainAttendanceRecord, message: &str) -> AttendanceResponse {
        AttendanceResponse {
            record: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_daily_response(result: DailyAttendanceResult) -> DailyAttendanceResponse {
        DailyAttendanceResponse {
            date: result.date.format("%Y-%m-%d").to_string(),
            records: result.records.into_iter().map(Self::to_dto).collect(),
            absent_child_ids: result.absent_child_ids.map(|ids| ids.into_iter().collect()),
        }
    }
}

/// Parse an RFC 3339 timestamp; None or blank means "not supplied"
pub fn parse_optional_timestamp(value: Option<&str>) -> DomainResult<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|e| DomainError::invalid(format!("Invalid timestamp '{}': {}", raw, e))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::AttendanceStatus;
    use std::collections::BTreeSet;

    #[test]
    fn test_check_in_request_parses_offset_timestamp() {
        let command = AttendanceMapper::to_check_in_command(CheckInRequest {
            child_id: " child::1 ".to_string(),
            timestamp: Some("2025-03-03T10:00:01+01:00".to_string()),
            brought_by: Some("  ".to_string()),
        })
        .unwrap();

        assert_eq!(command.child_id, "child::1");
        assert_eq!(
            command.timestamp,
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 1).unwrap())
        );
        assert_eq!(command.brought_by, None);
    }

    #[test]
    fn test_bad_inputs_are_invalid() {
        let err = AttendanceMapper::to_check_in_command(CheckInRequest {
            child_id: "child::1".to_string(),
            timestamp: Some("yesterday".to_string()),
            brought_by: None,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = AttendanceMapper::to_daily_query(DailyAttendanceRequest {
            date: "2025-02-30".to_string(),
            include_absent: false,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_daily_response_formats_date_and_absences() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 3, 8, 30, 0).unwrap();
        let response = AttendanceMapper::to_daily_response(DailyAttendanceResult {
            date,
            records: vec![DomainAttendanceRecord {
                id: 7,
                child_id: "child::1".to_string(),
                status: AttendanceStatus::Present,
                check_in_time: Some(at),
                check_out_time: None,
                brought_by: None,
                taken_by: None,
                created_at: at,
            }],
            absent_child_ids: Some(BTreeSet::from(["child::2".to_string()])),
        });

        assert_eq!(response.date, "2025-03-03");
        assert_eq!(response.records[0].check_in_time.as_deref(), Some("2025-03-03T08:30:00+00:00"));
        assert_eq!(response.absent_child_ids, Some(vec!["child::2".to_string()]));
    }
}
