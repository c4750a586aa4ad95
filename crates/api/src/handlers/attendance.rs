//! Handlers for the `/attendance` resource: marking classes and the
//! monthly overview.

use std::collections::{BTreeMap, HashSet};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use survivor_core::attendance::{evaluate_eligibility, month_summary, AttendanceStatus, MonthSummary};
use survivor_core::calendar::MonthView;
use survivor_core::error::CoreError;
use survivor_core::timetable::{weekday_index, weekday_name};
use survivor_core::types::DbId;
use survivor_db::models::attendance::{AttendanceRecord, UpsertAttendance};
use survivor_db::models::settings::min_attendance_or_default;
use survivor_db::repositories::{AttendanceRepo, SettingsRepo, SubjectRepo, TimetableRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_subject_owned;
use crate::middleware::auth::AuthUser;
use crate::query::MonthParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::summary::today;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /attendance`.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub subject_id: DbId,
    pub date: NaiveDate,
    pub status: String,
}

/// A subject scheduled today, with its standing and marks for the month.
#[derive(Debug, Serialize)]
pub struct TodaySubject {
    pub id: DbId,
    pub name: String,
    pub percentage: f64,
    pub skip_budget: i64,
    pub attendance: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceOverview {
    pub today: NaiveDate,
    pub weekday: &'static str,
    pub month: MonthView,
    pub summary: MonthSummary,
    pub today_subjects: Vec<TodaySubject>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/attendance
///
/// Record a class outcome for any date. Re-marking a day replaces the
/// previous status.
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<MarkAttendanceRequest>,
) -> AppResult<StatusCode> {
    let status = parse_status(&input.status)?;
    ensure_subject_owned(&state.pool, auth.user_id, input.subject_id).await?;

    AttendanceRepo::upsert(
        &state.pool,
        &UpsertAttendance {
            subject_id: input.subject_id,
            date: input.date,
            status,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        subject_id = input.subject_id,
        date = %input.date,
        status = status.as_str(),
        "Attendance marked"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/attendance/today/{subject_id}/{status}
///
/// Mark today's class. Only subjects on today's weekly timetable can be
/// marked this way; extra classes are marked through `POST /attendance`.
pub async fn mark_today(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((subject_id, status)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<AttendanceRecord>>> {
    let status = parse_status(&status)?;
    ensure_subject_owned(&state.pool, auth.user_id, subject_id).await?;

    let today = today();
    let slots = TimetableRepo::list_for_subject(&state.pool, subject_id).await?;
    if !slots.iter().any(|entry| entry.slot().is_regular_on(today)) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Subject {subject_id} is not on the timetable for {}",
            weekday_name(weekday_index(today)).unwrap_or("today")
        ))));
    }

    let record = AttendanceRepo::upsert(
        &state.pool,
        &UpsertAttendance {
            subject_id,
            date: today,
            status,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        subject_id,
        status = status.as_str(),
        "Today's attendance marked"
    );
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/attendance/overview?year=&month=
///
/// Month grid and summary, plus every subject that meets today (weekly
/// slots and extra classes).
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<DataResponse<AttendanceOverview>>> {
    let today = today();
    let month = params.resolve(today)?;
    let (from, to) = (month.first_day(), month.last_day());

    let settings = SettingsRepo::find(&state.pool, auth.user_id).await?;
    let min_required = min_attendance_or_default(settings.as_ref());
    let month_tally =
        AttendanceRepo::tally_for_user_between(&state.pool, auth.user_id, from, to).await?;

    let scheduled: HashSet<DbId> = TimetableRepo::list_for_user(&state.pool, auth.user_id)
        .await?
        .iter()
        .filter(|entry| entry.slot().is_scheduled_on(today))
        .map(|entry| entry.subject_id)
        .collect();

    let mut today_subjects = Vec::with_capacity(scheduled.len());
    for subject in SubjectRepo::list_for_user(&state.pool, auth.user_id).await? {
        if !scheduled.contains(&subject.id) {
            continue;
        }
        let tally = AttendanceRepo::tally_for_subject(&state.pool, subject.id).await?;
        let eligibility = evaluate_eligibility(tally, subject.thresholds());
        let attendance = AttendanceRepo::list_for_subject_between(&state.pool, subject.id, from, to)
            .await?
            .into_iter()
            .map(|record| (record.date, record.status))
            .collect();
        today_subjects.push(TodaySubject {
            id: subject.id,
            name: subject.name,
            percentage: eligibility.percentage,
            skip_budget: eligibility.skip_budget,
            attendance,
        });
    }

    Ok(Json(DataResponse {
        data: AttendanceOverview {
            today,
            weekday: weekday_name(weekday_index(today)).unwrap_or_default(),
            month: month.into(),
            summary: month_summary(month_tally, min_required),
            today_subjects,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_status(raw: &str) -> AppResult<AttendanceStatus> {
    AttendanceStatus::from_str_value(raw).map_err(AppError::BadRequest)
}
