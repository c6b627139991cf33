//! # REST API for Announcements
//!
//! Endpoints for creating announcements, listing the visible ones with the
//! caller's read state, recording views and triggering an expiry sweep.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use tracing::info;

use super::{error_response, optional_json};
use super::mappers::AnnouncementMapper;
use crate::domain::commands::announcements::MarkViewedCommand;
use crate::AppState;
use shared::{CreateAnnouncementRequest, MarkViewedResponse, UnreadCountResponse, ViewerQuery};

/// Create an announcement
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> impl IntoResponse {
    info!("POST /api/announcements - title: {}", request.title);

    let command = AnnouncementMapper::to_create_command(request);
    match state.announcement_service.create_announcement(command).await {
        Ok(announcement) => {
            (StatusCode::CREATED, Json(AnnouncementMapper::to_dto(announcement))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// List visible announcements with the viewer's read state
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> impl IntoResponse {
    info!("GET /api/announcements - viewer: {:?}", query);

    let identity = AnnouncementMapper::to_identity(query);
    let visible = match state.announcement_service.list_visible(Utc::now()).await {
        Ok(visible) => visible,
        Err(e) => return error_response(&e),
    };

    match state.view_tracker.with_read_status(&identity, visible).await {
        Ok(statuses) => {
            (StatusCode::OK, Json(AnnouncementMapper::to_list_response(statuses))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Number of visible announcements the viewer has not seen
pub async fn unread_count(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> impl IntoResponse {
    info!("GET /api/announcements/unread-count - viewer: {:?}", query);

    let identity = AnnouncementMapper::to_identity(query);
    let visible_ids: Vec<i64> = match state.announcement_service.list_visible(Utc::now()).await {
        Ok(visible) => visible.iter().map(|a| a.id).collect(),
        Err(e) => return error_response(&e),
    };

    match state.view_tracker.count_unviewed(&identity, &visible_ids).await {
        Ok(unread_count) => (StatusCode::OK, Json(UnreadCountResponse { unread_count })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Record that a viewer has seen an announcement. The viewer may be given in
/// the query string or in a JSON body; query values win. A malformed body is
/// a 400, never an anonymous view.
pub async fn mark_viewed(
    State(state): State<AppState>,
    Path(announcement_id): Path<i64>,
    Query(query): Query<ViewerQuery>,
    body: Result<Json<ViewerQuery>, JsonRejection>,
) -> impl IntoResponse {
    info!("POST /api/announcements/{}/view", announcement_id);

    let body = match optional_json(body) {
        Ok(body) => body.unwrap_or_default(),
        Err(e) => return error_response(&e),
    };
    let viewer = ViewerQuery {
        user_id: query.user_id.or(body.user_id),
        user_email: query.user_email.or(body.user_email),
    };

    let command = MarkViewedCommand {
        announcement_id,
        identity: AnnouncementMapper::to_identity(viewer),
    };

    match state.view_tracker.mark_viewed(command).await {
        Ok(result) => {
            let status = if result.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(MarkViewedResponse { created: result.created })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Delete expired announcements now
pub async fn sweep_announcements(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/announcements/sweep");

    match state.announcement_service.sweep_expired(Utc::now()).await {
        Ok(result) => (StatusCode::OK, Json(AnnouncementMapper::to_sweep_response(result))).into_response(),
        Err(e) => error_response(&e),
    }
}
