pub mod attendance;
pub mod resume;
