//! Repository for the `subjects` table.
//!
//! Every lookup is scoped to the owning user.

use sqlx::PgPool;
use survivor_core::types::DbId;

use crate::models::subject::{CreateSubject, Subject, UpdateSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, credits, attendance_required_percent, \
                        attendance_weight, created_at, updated_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject for `user_id`, returning the created row.
    ///
    /// Omitted thresholds fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSubject,
    ) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (user_id, name, credits, attendance_required_percent, attendance_weight)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 75), COALESCE($5, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.credits)
            .bind(input.attendance_required_percent)
            .bind(input.attendance_weight)
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's subjects.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user's subjects in creation order.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Subject>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count the user's subjects.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subjects WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Update a subject. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no subject with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET
                name = COALESCE($3, name),
                credits = COALESCE($4, credits),
                attendance_required_percent = COALESCE($5, attendance_required_percent),
                attendance_weight = COALESCE($6, attendance_weight)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.credits)
            .bind(input.attendance_required_percent)
            .bind(input.attendance_weight)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject with its attendance, deadlines and timetable rows.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
