//! Page click log model.

use serde::Serialize;
use sqlx::FromRow;
use survivor_core::types::{DbId, Timestamp};

/// A row from the `click_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClickLog {
    pub id: DbId,
    pub user_id: DbId,
    pub page: String,
    pub created_at: Timestamp,
}
