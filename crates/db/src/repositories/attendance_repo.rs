//! Repository for the `attendance` table and its aggregates.
//!
//! Aggregates only count non-cancelled rows; cancelled classes never enter
//! the denominator.

use chrono::NaiveDate;
use sqlx::PgPool;
use survivor_core::attendance::AttendanceTally;
use survivor_core::types::DbId;

use crate::models::attendance::{
    AttendanceRecord, DailyRateRow, SubjectTallyRow, TallyRow, UpsertAttendance,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject_id, date, status, created_at, updated_at";

/// Provides writes and aggregate reads over attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record the outcome of a class, replacing any mark for the same day.
    ///
    /// A single `INSERT ... ON CONFLICT DO UPDATE` keyed on
    /// `uq_attendance_subject_date`, so concurrent writers resolve
    /// last-write-wins and readers never see the day unmarked.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertAttendance,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (subject_id, date, status) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_attendance_subject_date DO UPDATE \
             SET status = EXCLUDED.status \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(input.subject_id)
            .bind(input.date)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Records of one subject between two dates (inclusive), oldest first.
    pub async fn list_for_subject_between(
        pool: &PgPool,
        subject_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE subject_id = $1 AND date BETWEEN $2 AND $3
             ORDER BY date"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(subject_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// All-time tally of one subject.
    pub async fn tally_for_subject(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<AttendanceTally, sqlx::Error> {
        let row = sqlx::query_as::<_, TallyRow>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'present') AS present
             FROM attendance
             WHERE subject_id = $1 AND status <> 'cancelled'",
        )
        .bind(subject_id)
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }

    /// All-time tally of every subject the user owns, including subjects
    /// with no records (tally zero).
    pub async fn tallies_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SubjectTallyRow>, sqlx::Error> {
        sqlx::query_as::<_, SubjectTallyRow>(
            "SELECT s.id AS subject_id,
                    COUNT(a.id) AS total,
                    COUNT(a.id) FILTER (WHERE a.status = 'present') AS present
             FROM subjects s
             LEFT JOIN attendance a ON a.subject_id = s.id AND a.status <> 'cancelled'
             WHERE s.user_id = $1
             GROUP BY s.id
             ORDER BY s.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Tally across all of the user's subjects between two dates (inclusive).
    pub async fn tally_for_user_between(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<AttendanceTally, sqlx::Error> {
        let row = sqlx::query_as::<_, TallyRow>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE a.status = 'present') AS present
             FROM attendance a
             JOIN subjects s ON s.id = a.subject_id
             WHERE s.user_id = $1
               AND a.status <> 'cancelled'
               AND a.date BETWEEN $2 AND $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }

    /// Per-day tallies across the user's subjects, oldest first.
    ///
    /// With `since = None` the whole history is returned.
    pub async fn daily_rates_for_user(
        pool: &PgPool,
        user_id: DbId,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DailyRateRow>, sqlx::Error> {
        sqlx::query_as::<_, DailyRateRow>(
            "SELECT a.date AS date,
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE a.status = 'present') AS present
             FROM attendance a
             JOIN subjects s ON s.id = a.subject_id
             WHERE s.user_id = $1
               AND a.status <> 'cancelled'
               AND ($2::date IS NULL OR a.date >= $2)
             GROUP BY a.date
             ORDER BY a.date",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Count the user's non-cancelled records.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM attendance a
             JOIN subjects s ON s.id = a.subject_id
             WHERE s.user_id = $1 AND a.status <> 'cancelled'",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
