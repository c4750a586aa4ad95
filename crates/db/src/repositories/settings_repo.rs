//! Repository for the `settings` table.

use sqlx::PgPool;
use survivor_core::types::DbId;

use crate::models::settings::UserSettings;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, min_attendance, updated_at";

/// Provides read/upsert for per-user settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Get a user's settings row, if one has been saved.
    pub async fn find(pool: &PgPool, user_id: DbId) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a user's settings. Creates if absent, updates if exists.
    ///
    /// Uses `ON CONFLICT (user_id) DO UPDATE` to guarantee one row per user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        min_attendance: f64,
    ) -> Result<UserSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (user_id, min_attendance) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE \
             SET min_attendance = EXCLUDED.min_attendance \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .bind(min_attendance)
            .fetch_one(pool)
            .await
    }
}
