//! Subject entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survivor_core::subject::SubjectThresholds;
use survivor_core::types::{DbId, Timestamp};

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub credits: i32,
    pub attendance_required_percent: f64,
    pub attendance_weight: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subject {
    /// The configuration the eligibility calculator reads.
    pub fn thresholds(&self) -> SubjectThresholds {
        SubjectThresholds {
            required_percent: self.attendance_required_percent,
            weight: self.attendance_weight,
        }
    }
}

/// DTO for creating a subject. Omitted thresholds take the column defaults.
#[derive(Debug, Deserialize)]
pub struct CreateSubject {
    pub name: String,
    pub credits: Option<i32>,
    pub attendance_required_percent: Option<f64>,
    pub attendance_weight: Option<f64>,
}

/// DTO for updating a subject. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub attendance_required_percent: Option<f64>,
    pub attendance_weight: Option<f64>,
}
