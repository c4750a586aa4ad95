//! Repository for the `deadlines` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use survivor_core::types::DbId;

use crate::models::deadline::{CreateDeadline, Deadline, DeadlineWithSubject, UpdateDeadline};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject_id, title, due_date, type AS deadline_type, completed, \
                        created_at, updated_at";

/// Columns for [`DeadlineWithSubject`], with `d` = deadlines and `s` = subjects.
const JOINED_COLUMNS: &str = "d.id, d.subject_id, s.name AS subject_name, d.title, d.due_date, \
                               d.type AS deadline_type, d.completed";

/// Ownership filter: the deadline's subject belongs to `$2`.
const OWNED_BY: &str = "subject_id IN (SELECT id FROM subjects WHERE user_id = $2)";

/// Provides CRUD operations for deadlines.
pub struct DeadlineRepo;

impl DeadlineRepo {
    /// Insert a new deadline, returning the created row.
    ///
    /// The caller is responsible for checking the subject's owner.
    pub async fn create(pool: &PgPool, input: &CreateDeadline) -> Result<Deadline, sqlx::Error> {
        let query = format!(
            "INSERT INTO deadlines (subject_id, title, due_date, type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deadline>(&query)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(input.due_date)
            .bind(input.deadline_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's deadlines.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Deadline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deadlines WHERE id = $1 AND {OWNED_BY}");
        sqlx::query_as::<_, Deadline>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all of the user's deadlines with their subject names, soonest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DeadlineWithSubject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM deadlines d
             JOIN subjects s ON s.id = d.subject_id
             WHERE s.user_id = $1
             ORDER BY d.due_date, d.id"
        );
        sqlx::query_as::<_, DeadlineWithSubject>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Incomplete deadlines due between two dates (inclusive), soonest first.
    pub async fn list_pending_between(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DeadlineWithSubject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM deadlines d
             JOIN subjects s ON s.id = d.subject_id
             WHERE s.user_id = $1
               AND d.completed = false
               AND d.due_date BETWEEN $2 AND $3
             ORDER BY d.due_date, d.id"
        );
        sqlx::query_as::<_, DeadlineWithSubject>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// All incomplete deadlines of the user's subjects.
    pub async fn list_pending_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Deadline>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deadlines
             WHERE completed = false
               AND subject_id IN (SELECT id FROM subjects WHERE user_id = $1)
             ORDER BY due_date, id"
        );
        sqlx::query_as::<_, Deadline>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count all of the user's deadlines.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM deadlines d
             JOIN subjects s ON s.id = d.subject_id
             WHERE s.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Update a deadline. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no deadline with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateDeadline,
    ) -> Result<Option<Deadline>, sqlx::Error> {
        let query = format!(
            "UPDATE deadlines SET
                title = COALESCE($3, title),
                due_date = COALESCE($4, due_date),
                type = COALESCE($5, type),
                completed = COALESCE($6, completed)
             WHERE id = $1 AND {OWNED_BY}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deadline>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.due_date)
            .bind(input.deadline_type.map(|t| t.as_str()))
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's deadlines. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM deadlines WHERE id = $1 AND {OWNED_BY}");
        let result = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
