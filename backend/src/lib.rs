//! # Daycare Backend
//!
//! Attendance and announcement rules for a daycare, served over a REST API.
//!
//! The crate follows a layered architecture:
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, pure rules)
//!     ↓
//! Storage Layer (record store traits, SQLite repositories)
//! ```
//!
//! [`initialize_backend`] builds every service over one database pool and
//! [`create_router`] wires them into an axum router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::models::attendance::AttendancePolicy;
use crate::domain::{AnnouncementService, AttendanceService, NotificationService, ViewTracker};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub attendance_service: AttendanceService,
    pub announcement_service: AnnouncementService,
    pub view_tracker: ViewTracker,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn from_connection(db: DbConnection, policy: AttendancePolicy) -> Self {
        Self {
            attendance_service: AttendanceService::new(db.clone(), policy),
            announcement_service: AnnouncementService::new(db.clone()),
            view_tracker: ViewTracker::new(db.clone()),
            notification_service: NotificationService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let policy = config.attendance_policy()?;
    info!(
        "Late cutoff {} minutes after midnight at UTC offset {}",
        policy.late_cutoff_minutes(),
        policy.site_offset()
    );

    Ok(AppState::from_connection(db_conn, policy))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    // CORS setup to allow the frontend to make requests
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/attendance", get(io::daily_attendance))
        .route("/attendance/check-in", post(io::check_in))
        .route("/attendance/:id/check-out", post(io::check_out))
        .route(
            "/announcements",
            get(io::list_announcements).post(io::create_announcement),
        )
        .route("/announcements/unread-count", get(io::unread_count))
        .route("/announcements/sweep", post(io::sweep_announcements))
        .route("/announcements/:id/view", post(io::mark_viewed))
        .route("/messages", post(io::broadcast_message))
        .route("/notifications", get(io::list_notifications))
        .route("/notifications/read", post(io::mark_notifications_read))
        .route("/notifications/:id", delete(io::delete_notification));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
