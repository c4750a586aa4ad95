//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod attendance;
pub mod click_log;
pub mod deadline;
pub mod session;
pub mod settings;
pub mod subject;
pub mod timetable;
pub mod user;
