pub mod announcement;
pub mod attendance;
pub mod child;
pub mod message;
