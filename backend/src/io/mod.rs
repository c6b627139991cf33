//! # IO Module
//!
//! Provides the interface layer between HTTP clients and the domain logic.
//!
//! Requests arrive as `shared` DTOs, are mapped into domain commands, and the
//! domain results are mapped back into DTOs. Domain errors become HTTP status
//! codes here and nowhere else.
//!
//! ## Supported Operations
//!
//! - **POST /api/attendance/check-in**: Check a child in
//! - **POST /api/attendance/:id/check-out**: Check a child out
//! - **GET /api/attendance**: One day's attendance, optionally with absences
//! - **POST /api/announcements**: Create an announcement
//! - **GET /api/announcements**: Visible announcements with read state
//! - **GET /api/announcements/unread-count**: Unread visible announcements
//! - **POST /api/announcements/:id/view**: Record a view
//! - **POST /api/announcements/sweep**: Delete expired announcements
//! - **POST /api/messages**: Broadcast a message to parents
//! - **GET /api/notifications**: A parent's notifications
//! - **POST /api/notifications/read**: Mark notifications read
//! - **DELETE /api/notifications/:id**: Delete a parent's notification

pub mod rest;

pub use rest::*;
