//! # Domain Module
//!
//! Contains the business rules for the daycare backend.
//!
//! Each service owns one concern and reads and writes through the storage
//! traits. Services never call each other; the REST layer composes them where
//! a request needs more than one.
//!
//! ## Module Organization
//!
//! - **attendance_service**: Check-in classification, check-out and daily views
//! - **absence**: Deriving absent children from the roster and the day's records
//! - **announcement_service**: Creating announcements, listing visible ones, expiry sweeps
//! - **visibility**: Pure age and expiry rules for announcements
//! - **view_tracker**: Per-viewer read state for announcements
//! - **notification_service**: Broadcast fan-out and notification read state
//! - **expiry_sweeper**: Background task running the expiry sweep on a timer
//!
//! ## Business Rules
//!
//! - A check-in after the site's late cutoff is Late, at or before it is Present
//! - Absent is derived per day and never stored
//! - An announcement with a window of N days is visible while it is at most N whole days old
//! - A viewer has at most one view per announcement, matched by user id or email
//! - A broadcast creates exactly one notification per recipient entry, or nothing

pub mod absence;
pub mod announcement_service;
pub mod attendance_service;
pub mod commands;
pub mod errors;
pub mod expiry_sweeper;
pub mod models;
pub mod notification_service;
pub mod view_tracker;
pub mod visibility;

pub use announcement_service::AnnouncementService;
pub use attendance_service::AttendanceService;
pub use errors::{DomainError, DomainResult};
pub use expiry_sweeper::spawn_expiry_sweeper;
pub use notification_service::NotificationService;
pub use view_tracker::ViewTracker;
