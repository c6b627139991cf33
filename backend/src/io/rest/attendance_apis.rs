//! # REST API for Attendance
//!
//! Endpoints for checking children in and out and listing a day's attendance.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::{error_response, optional_json};
use super::mappers::AttendanceMapper;
use crate::AppState;
use shared::{CheckInRequest, CheckOutRequest, DailyAttendanceRequest};

/// Check a child in
pub async fn check_in(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/check-in - request: {:?}", request);

    let command = match AttendanceMapper::to_check_in_command(request) {
        Ok(command) => command,
        Err(e) => return error_response(&e),
    };

    match state.attendance_service.check_in(command).await {
        Ok(record) => {
            let message = format!("Checked in as {}", record.status);
            let response = AttendanceMapper::to_attendance_response(record, &message);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Check a child out of an existing attendance record
pub async fn check_out(
    State(state): State<AppState>,
    Path(attendance_id): Path<i64>,
    request: Result<Json<CheckOutRequest>, JsonRejection>,
) -> impl IntoResponse {
    info!("POST /api/attendance/{}/check-out", attendance_id);

    let request = match optional_json(request) {
        Ok(request) => request.unwrap_or_default(),
        Err(e) => return error_response(&e),
    };
    let command = match AttendanceMapper::to_check_out_command(attendance_id, request) {
        Ok(command) => command,
        Err(e) => return error_response(&e),
    };

    match state.attendance_service.check_out(command).await {
        Ok(record) => {
            let response = AttendanceMapper::to_attendance_response(record, "Checked out");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// List one day's attendance, optionally with absent children
pub async fn daily_attendance(
    State(state): State<AppState>,
    Query(request): Query<DailyAttendanceRequest>,
) -> impl IntoResponse {
    info!("GET /api/attendance - query: {:?}", request);

    let query = match AttendanceMapper::to_daily_query(request) {
        Ok(query) => query,
        Err(e) => return error_response(&e),
    };

    match state.attendance_service.daily_attendance(query).await {
        Ok(result) => (StatusCode::OK, Json(AttendanceMapper::to_daily_response(result))).into_response(),
        Err(e) => error_response(&e),
    }
}
