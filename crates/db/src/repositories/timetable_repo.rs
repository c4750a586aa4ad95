//! Repository for the `timetable` table.

use sqlx::PgPool;
use survivor_core::timetable::EXTRA_CLASS_WEEKDAY;
use survivor_core::types::DbId;

use crate::models::timetable::{CreateExtraClass, TimetableEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, subject_id, weekday, is_extra, class_date, created_at";

/// Provides reads and writes over weekly slots and extra classes.
pub struct TimetableRepo;

impl TimetableRepo {
    /// All timetable rows of the user, regular slots before extra classes.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timetable
             WHERE user_id = $1
             ORDER BY is_extra, subject_id, weekday, class_date"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Timetable rows of one subject.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<Vec<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timetable
             WHERE subject_id = $1
             ORDER BY is_extra, weekday, class_date"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the weekly slots of a subject within a transaction.
    ///
    /// Extra classes are left untouched. `weekdays` must already be validated.
    pub async fn replace_weekdays(
        pool: &PgPool,
        user_id: DbId,
        subject_id: DbId,
        weekdays: &[i16],
    ) -> Result<Vec<TimetableEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM timetable WHERE subject_id = $1 AND is_extra = false")
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO timetable (user_id, subject_id, weekday, is_extra)
             VALUES ($1, $2, $3, false)
             RETURNING {COLUMNS}"
        );
        let mut results = Vec::with_capacity(weekdays.len());
        for weekday in weekdays {
            let row = sqlx::query_as::<_, TimetableEntry>(&query)
                .bind(user_id)
                .bind(subject_id)
                .bind(*weekday)
                .fetch_one(&mut *tx)
                .await?;
            results.push(row);
        }

        tx.commit().await?;
        Ok(results)
    }

    /// Schedule a one-off class, returning the created row.
    pub async fn add_extra(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateExtraClass,
    ) -> Result<TimetableEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO timetable (user_id, subject_id, weekday, is_extra, class_date)
             VALUES ($1, $2, $3, true, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(user_id)
            .bind(input.subject_id)
            .bind(EXTRA_CLASS_WEEKDAY)
            .bind(input.class_date)
            .fetch_one(pool)
            .await
    }
}
