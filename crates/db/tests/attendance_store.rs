//! Integration tests for the attendance store and ownership scoping.
//!
//! - Upsert keeps one row per (subject, date) with the last status
//! - Aggregates skip cancelled classes
//! - Deleting a subject cascades to attendance, deadlines and timetable
//! - Foreign subjects and deadlines are invisible to other users

use chrono::NaiveDate;
use sqlx::PgPool;
use survivor_core::attendance::{AttendanceStatus, AttendanceTally};
use survivor_core::deadline::DeadlineType;
use survivor_db::models::attendance::UpsertAttendance;
use survivor_db::models::deadline::{CreateDeadline, UpdateDeadline};
use survivor_db::models::subject::CreateSubject;
use survivor_db::models::timetable::CreateExtraClass;
use survivor_db::models::user::CreateUser;
use survivor_db::repositories::{
    AttendanceRepo, ClickLogRepo, DeadlineRepo, SettingsRepo, SubjectRepo, TimetableRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: None,
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_subject(pool: &PgPool, user_id: i64, name: &str) -> i64 {
    SubjectRepo::create(
        pool,
        user_id,
        &CreateSubject {
            name: name.to_string(),
            credits: None,
            attendance_required_percent: None,
            attendance_weight: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

fn mark(subject_id: i64, date: NaiveDate, status: AttendanceStatus) -> UpsertAttendance {
    UpsertAttendance {
        subject_id,
        date,
        status,
    }
}

async fn row_count(pool: &PgPool, table: &str, subject_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE subject_id = $1"))
            .bind(subject_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_marking_twice_keeps_last_status(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let subject_id = seed_subject(&pool, user_id, "Physics").await;

    let first = AttendanceRepo::upsert(&pool, &mark(subject_id, day(1), AttendanceStatus::Absent))
        .await
        .unwrap();
    let second =
        AttendanceRepo::upsert(&pool, &mark(subject_id, day(1), AttendanceStatus::Present))
            .await
            .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, "present");
    assert_eq!(row_count(&pool, "attendance", subject_id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subject_defaults_apply(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let subject_id = seed_subject(&pool, user_id, "Physics").await;

    let subject = SubjectRepo::find_for_user(&pool, user_id, subject_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subject.credits, 0);
    assert_eq!(subject.attendance_required_percent, 75.0);
    assert_eq!(subject.attendance_weight, 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tallies_skip_cancelled(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let physics = seed_subject(&pool, user_id, "Physics").await;
    let empty = seed_subject(&pool, user_id, "Chemistry").await;

    for (d, status) in [
        (1, AttendanceStatus::Present),
        (2, AttendanceStatus::Absent),
        (3, AttendanceStatus::Cancelled),
        (4, AttendanceStatus::Present),
    ] {
        AttendanceRepo::upsert(&pool, &mark(physics, day(d), status))
            .await
            .unwrap();
    }

    let tally = AttendanceRepo::tally_for_subject(&pool, physics).await.unwrap();
    assert_eq!(tally, AttendanceTally::new(3, 2));

    let per_subject = AttendanceRepo::tallies_for_user(&pool, user_id).await.unwrap();
    assert_eq!(per_subject.len(), 2);
    assert_eq!(per_subject[0].subject_id, physics);
    assert_eq!(per_subject[0].tally(), AttendanceTally::new(3, 2));
    assert_eq!(per_subject[1].subject_id, empty);
    assert_eq!(per_subject[1].tally(), AttendanceTally::default());

    let window = AttendanceRepo::tally_for_user_between(&pool, user_id, day(2), day(3))
        .await
        .unwrap();
    assert_eq!(window, AttendanceTally::new(1, 0));

    let daily = AttendanceRepo::daily_rates_for_user(&pool, user_id, Some(day(2)))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = daily.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(2), day(4)]);

    assert_eq!(AttendanceRepo::count_for_user(&pool, user_id).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subject_delete_cascades(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let subject_id = seed_subject(&pool, user_id, "Physics").await;

    AttendanceRepo::upsert(&pool, &mark(subject_id, day(1), AttendanceStatus::Present))
        .await
        .unwrap();
    DeadlineRepo::create(
        &pool,
        &CreateDeadline {
            subject_id,
            title: "Lab report".to_string(),
            due_date: day(10),
            deadline_type: DeadlineType::Assignment,
        },
    )
    .await
    .unwrap();
    TimetableRepo::replace_weekdays(&pool, user_id, subject_id, &[0, 2])
        .await
        .unwrap();
    TimetableRepo::add_extra(
        &pool,
        user_id,
        &CreateExtraClass {
            subject_id,
            class_date: day(5),
        },
    )
    .await
    .unwrap();

    assert!(SubjectRepo::delete(&pool, user_id, subject_id).await.unwrap());

    assert_eq!(row_count(&pool, "attendance", subject_id).await, 0);
    assert_eq!(row_count(&pool, "deadlines", subject_id).await, 0);
    assert_eq!(row_count(&pool, "timetable", subject_id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_rows_are_invisible(pool: PgPool) {
    let owner = seed_user(&pool, "ana").await;
    let other = seed_user(&pool, "ben").await;
    let subject_id = seed_subject(&pool, owner, "Physics").await;
    let deadline = DeadlineRepo::create(
        &pool,
        &CreateDeadline {
            subject_id,
            title: "Midterm".to_string(),
            due_date: day(20),
            deadline_type: DeadlineType::Exam,
        },
    )
    .await
    .unwrap();

    assert!(SubjectRepo::find_for_user(&pool, other, subject_id)
        .await
        .unwrap()
        .is_none());
    assert!(!SubjectRepo::delete(&pool, other, subject_id).await.unwrap());
    assert!(DeadlineRepo::find_for_user(&pool, other, deadline.id)
        .await
        .unwrap()
        .is_none());

    let patch = UpdateDeadline {
        completed: Some(true),
        ..Default::default()
    };
    assert!(DeadlineRepo::update(&pool, other, deadline.id, &patch)
        .await
        .unwrap()
        .is_none());
    let updated = DeadlineRepo::update(&pool, owner, deadline.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.deadline_type, "exam");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_weekdays_keeps_extra_classes(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let subject_id = seed_subject(&pool, user_id, "Physics").await;

    TimetableRepo::replace_weekdays(&pool, user_id, subject_id, &[0, 1, 2])
        .await
        .unwrap();
    TimetableRepo::add_extra(
        &pool,
        user_id,
        &CreateExtraClass {
            subject_id,
            class_date: day(6),
        },
    )
    .await
    .unwrap();
    TimetableRepo::replace_weekdays(&pool, user_id, subject_id, &[4])
        .await
        .unwrap();

    let entries = TimetableRepo::list_for_subject(&pool, subject_id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].weekday, 4);
    assert!(!entries[0].is_extra);
    assert!(entries[1].is_extra);
    assert_eq!(entries[1].class_date, Some(day(6)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_upsert_single_row(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;

    assert!(SettingsRepo::find(&pool, user_id).await.unwrap().is_none());
    SettingsRepo::upsert(&pool, user_id, 80.0).await.unwrap();
    let saved = SettingsRepo::upsert(&pool, user_id, 65.0).await.unwrap();
    assert_eq!(saved.min_attendance, 65.0);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_user_name_rejected(pool: PgPool) {
    seed_user(&pool, "ana").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            name: "ana".to_string(),
            email: None,
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_click_log_counts_per_page(pool: PgPool) {
    let user_id = seed_user(&pool, "ana").await;
    let other = seed_user(&pool, "ben").await;
    for page in ["dashboard", "dashboard", "subjects"] {
        ClickLogRepo::create(&pool, user_id, page).await.unwrap();
    }
    ClickLogRepo::create(&pool, other, "dashboard").await.unwrap();

    assert_eq!(ClickLogRepo::count_for_page(&pool, user_id, "dashboard").await.unwrap(), 2);
    assert_eq!(ClickLogRepo::count_for_page(&pool, user_id, "timetable").await.unwrap(), 0);
}
