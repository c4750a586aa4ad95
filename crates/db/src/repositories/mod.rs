//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Anything a user owns is
//! looked up through its owner, so a foreign id reads as "not found".

pub mod attendance_repo;
pub mod click_log_repo;
pub mod deadline_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod subject_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use click_log_repo::ClickLogRepo;
pub use deadline_repo::DeadlineRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use subject_repo::SubjectRepo;
pub use timetable_repo::TimetableRepo;
pub use user_repo::UserRepo;
