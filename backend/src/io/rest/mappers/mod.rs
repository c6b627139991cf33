pub mod announcement_mapper;
pub mod attendance_mapper;
pub mod notification_mapper;

pub use announcement_mapper::AnnouncementMapper;
pub use attendance_mapper::AttendanceMapper;
pub use notification_mapper::NotificationMapper;
