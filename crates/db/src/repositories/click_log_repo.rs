//! Repository for the `click_log` table.

use sqlx::PgPool;
use survivor_core::types::DbId;

use crate::models::click_log::ClickLog;

/// Append-only page click log.
pub struct ClickLogRepo;

impl ClickLogRepo {
    /// Record that `user_id` opened `page`.
    pub async fn create(pool: &PgPool, user_id: DbId, page: &str) -> Result<ClickLog, sqlx::Error> {
        sqlx::query_as::<_, ClickLog>(
            "INSERT INTO click_log (user_id, page)
             VALUES ($1, $2)
             RETURNING id, user_id, page, created_at",
        )
        .bind(user_id)
        .bind(page)
        .fetch_one(pool)
        .await
    }

    /// Number of recorded clicks of `user_id` on `page`.
    pub async fn count_for_page(
        pool: &PgPool,
        user_id: DbId,
        page: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM click_log WHERE user_id = $1 AND page = $2")
            .bind(user_id)
            .bind(page)
            .fetch_one(pool)
            .await
    }
}
