//! Timetable entry model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survivor_core::timetable::TimetableSlot;
use survivor_core::types::{DbId, Timestamp};

/// A row from the `timetable` table: a weekly slot or a one-off extra class.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub subject_id: DbId,
    pub weekday: i16,
    pub is_extra: bool,
    pub class_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

impl TimetableEntry {
    pub fn slot(&self) -> TimetableSlot {
        TimetableSlot {
            weekday: self.weekday,
            is_extra: self.is_extra,
            class_date: self.class_date,
        }
    }
}

/// DTO for scheduling an extra class.
#[derive(Debug, Deserialize)]
pub struct CreateExtraClass {
    pub subject_id: DbId,
    pub class_date: NaiveDate,
}
