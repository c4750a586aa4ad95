//! Attendance record model, DTOs and aggregate row shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survivor_core::attendance::{AttendanceStatus, AttendanceTally, DailyTally};
use survivor_core::types::{DbId, Timestamp};

/// A row from the `attendance` table. At most one per (subject, date).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub subject_id: DbId,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a class outcome. Replaces any existing mark for the day.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertAttendance {
    pub subject_id: DbId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Count of non-cancelled records and how many of them were present.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TallyRow {
    pub total: i64,
    pub present: i64,
}

impl From<TallyRow> for AttendanceTally {
    fn from(row: TallyRow) -> Self {
        AttendanceTally::new(row.total, row.present)
    }
}

/// [`TallyRow`] keyed by subject.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct SubjectTallyRow {
    pub subject_id: DbId,
    pub total: i64,
    pub present: i64,
}

impl SubjectTallyRow {
    pub fn tally(&self) -> AttendanceTally {
        AttendanceTally::new(self.total, self.present)
    }
}

/// [`TallyRow`] keyed by calendar day, across all of a user's subjects.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DailyRateRow {
    pub date: NaiveDate,
    pub total: i64,
    pub present: i64,
}

impl From<DailyRateRow> for DailyTally {
    fn from(row: DailyRateRow) -> Self {
        DailyTally {
            date: row.date,
            tally: AttendanceTally::new(row.total, row.present),
        }
    }
}
