//! # REST API for Messages and Notifications
//!
//! Endpoints for broadcasting staff messages and managing the resulting
//! per-parent notifications.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::NotificationMapper;
use crate::AppState;
use shared::{BroadcastRequest, MarkReadRequest, MarkReadResponse, NotificationListRequest};

/// Broadcast a message to a list of parents
pub async fn broadcast_message(
    State(state): State<AppState>,
    Json(request): Json<BroadcastRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/messages - subject: {}, recipients: {}",
        request.subject,
        request.recipients.len()
    );

    let command = NotificationMapper::to_broadcast_command(request);
    match state.notification_service.broadcast(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(NotificationMapper::to_broadcast_response(result)),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// List a parent's notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(request): Query<NotificationListRequest>,
) -> impl IntoResponse {
    info!("GET /api/notifications - email: {}", request.email);

    match state.notification_service.notifications_for(&request.email).await {
        Ok(result) => (StatusCode::OK, Json(NotificationMapper::to_list_response(result))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Mark notifications as read
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    Json(request): Json<MarkReadRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/notifications/read - {} ids",
        request.notification_ids.len()
    );

    let command = NotificationMapper::to_mark_read_command(request);
    match state.notification_service.mark_read(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(MarkReadResponse {
                updated_count: result.updated_count,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Delete one of a parent's notifications
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
    Query(request): Query<NotificationListRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/notifications/{} - email: {}", notification_id, request.email);

    match state
        .notification_service
        .delete_notification(notification_id, &request.email)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}
