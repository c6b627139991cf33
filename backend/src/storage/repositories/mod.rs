pub mod announcement_repository;
pub mod announcement_view_repository;
pub mod attendance_repository;
pub mod child_repository;
pub mod notification_repository;

pub use announcement_repository::AnnouncementRepository;
pub use announcement_view_repository::AnnouncementViewRepository;
pub use attendance_repository::AttendanceRepository;
pub use child_repository::ChildRepository;
pub use notification_repository::NotificationRepository;

/// Ids bound per `IN (...)` list; SQLite caps bound variables per statement.
pub(crate) const MAX_IDS_PER_STATEMENT: usize = 500;

/// Sorted, deduplicated copy so an id split across chunks is not counted twice
pub(crate) fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}
