//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the daycare backend.
//! This layer handles:
//! - Parsing request DTOs from the `shared` crate into domain commands
//! - Translating domain errors into HTTP status codes
//! - Composing services where one request needs more than one
//!
//! Handlers contain no business rules. Every error leaves as an
//! [`ErrorResponse`] body whose `kind` names the domain error.

pub mod announcement_apis;
pub mod attendance_apis;
pub mod mappers;
pub mod notification_apis;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

use crate::domain::errors::{DomainError, DomainResult};
use shared::ErrorResponse;

pub use announcement_apis::*;
pub use attendance_apis::*;
pub use notification_apis::*;

/// HTTP status for each domain error kind
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Convert a domain error into a JSON error response
pub fn error_response(err: &DomainError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Request failed: {:#}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }),
    )
        .into_response()
}

/// Body for routes where JSON is optional. A request without a JSON content
/// type has no body; a JSON body that fails to parse is rejected.
pub fn optional_json<T>(body: Result<Json<T>, JsonRejection>) -> DomainResult<Option<T>> {
    match body {
        Ok(Json(value)) => Ok(Some(value)),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
        Err(rejection) => Err(DomainError::invalid(format!(
            "Invalid JSON body: {}",
            rejection.body_text()
        ))),
    }
}
