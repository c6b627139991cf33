//! # Storage Module
//!
//! Handles all data persistence for the daycare backend.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`repositories`] implement them over a shared
//! [`DbConnection`] pool built once at startup.
//!
//! ## Guarantees relied on by the domain
//!
//! - **Atomic view insert**: `insert_view_if_absent` is a single statement
//!   backed by unique indexes, so concurrent first views cannot duplicate.
//! - **Atomic fan-out**: a broadcast message and its notifications are written
//!   in one transaction.
//! - **Idempotent deletes**: deleting ids that are already gone is a no-op and
//!   is not counted.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{
    AnnouncementRepository, AnnouncementViewRepository, AttendanceRepository, ChildRepository,
    NotificationRepository,
};
pub use traits::*;
