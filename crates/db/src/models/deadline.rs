//! Deadline entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survivor_core::deadline::{DeadlineSnapshot, DeadlineType};
use survivor_core::types::{DbId, Timestamp};

/// A row from the `deadlines` table.
///
/// The `type` column is selected as `deadline_type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deadline {
    pub id: DbId,
    pub subject_id: DbId,
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(rename = "type")]
    pub deadline_type: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Deadline {
    /// The fields the deadline rules read.
    pub fn snapshot(&self) -> DeadlineSnapshot {
        DeadlineSnapshot {
            due_date: self.due_date,
            completed: self.completed,
            // The column CHECK constraint keeps this parse infallible.
            kind: DeadlineType::from_str_value(&self.deadline_type).unwrap_or(DeadlineType::Other),
        }
    }
}

/// A deadline joined with the name of its subject, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeadlineWithSubject {
    pub id: DbId,
    pub subject_id: DbId,
    pub subject_name: String,
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(rename = "type")]
    pub deadline_type: String,
    pub completed: bool,
}

/// DTO for creating a deadline.
#[derive(Debug, Deserialize)]
pub struct CreateDeadline {
    pub subject_id: DbId,
    pub title: String,
    pub due_date: NaiveDate,
    pub deadline_type: DeadlineType,
}

/// DTO for updating a deadline. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeadline {
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub deadline_type: Option<DeadlineType>,
    pub completed: Option<bool>,
}
