//! Per-user settings model.

use serde::Serialize;
use sqlx::FromRow;
use survivor_core::subject::DEFAULT_REQUIRED_PERCENT;
use survivor_core::types::{DbId, Timestamp};

/// A row from the `settings` table. Users without a row use the defaults.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSettings {
    pub user_id: DbId,
    pub min_attendance: f64,
    pub updated_at: Timestamp,
}

/// Monthly minimum attendance for a user, falling back to the default.
pub fn min_attendance_or_default(settings: Option<&UserSettings>) -> f64 {
    settings.map_or(DEFAULT_REQUIRED_PERCENT, |s| s.min_attendance)
}
