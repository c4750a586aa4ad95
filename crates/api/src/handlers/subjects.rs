//! Handlers for the `/subjects` resource.
//!
//! Every subject payload carries its live attendance percentage and skip
//! budget from the eligibility calculator.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use survivor_core::attendance::{evaluate_eligibility, Eligibility};
use survivor_core::calendar::MonthView;
use survivor_core::error::CoreError;
use survivor_core::subject::{validate_required_percent, validate_subject_name, validate_weight};
use survivor_core::types::DbId;
use survivor_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use survivor_db::repositories::{AttendanceRepo, SubjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_subject_owned;
use crate::middleware::auth::AuthUser;
use crate::query::MonthParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::summary::{subject_standings, today};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A subject with its eligibility.
#[derive(Debug, Serialize)]
pub struct SubjectResponse {
    #[serde(flatten)]
    pub subject: Subject,
    pub percentage: f64,
    pub skip_budget: i64,
}

impl SubjectResponse {
    fn new(subject: Subject, eligibility: Eligibility) -> Self {
        Self {
            subject,
            percentage: eligibility.percentage,
            skip_budget: eligibility.skip_budget,
        }
    }
}

/// Request body for `POST /subjects` and `PUT /subjects/{id}`.
///
/// On create `name` is required; on update omitted fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct SubjectRequest {
    pub name: Option<String>,
    #[validate(range(min = 0, max = 100, message = "credits must be between 0 and 100"))]
    pub credits: Option<i32>,
    pub attendance_required_percent: Option<f64>,
    pub attendance_weight: Option<f64>,
}

impl SubjectRequest {
    /// Validate the present fields and trim the name.
    fn validated(mut self) -> Result<Self, AppError> {
        self.validate()?;
        if let Some(name) = self.name.as_mut() {
            validate_subject_name(name)?;
            *name = name.trim().to_string();
        }
        if let Some(pct) = self.attendance_required_percent {
            validate_required_percent(pct)?;
        }
        if let Some(weight) = self.attendance_weight {
            validate_weight(weight)?;
        }
        Ok(self)
    }
}

/// One subject's marks for a month, keyed by date.
#[derive(Debug, Serialize)]
pub struct SubjectCalendarResponse {
    pub subject_id: DbId,
    pub subject_name: String,
    pub month: MonthView,
    pub attendance: BTreeMap<NaiveDate, String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SubjectResponse>>>> {
    let standings = subject_standings(&state.pool, auth.user_id).await?;
    let data = standings
        .into_iter()
        .map(|s| SubjectResponse::new(s.subject, s.eligibility))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SubjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubjectResponse>>)> {
    let input = input.validated()?;
    let name = input
        .name
        .ok_or_else(|| AppError::Core(CoreError::Validation("Subject name is required".into())))?;

    let subject = SubjectRepo::create(
        &state.pool,
        auth.user_id,
        &CreateSubject {
            name,
            credits: input.credits,
            attendance_required_percent: input.attendance_required_percent,
            attendance_weight: input.attendance_weight,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, subject_id = subject.id, "Subject created");
    let eligibility = evaluate_eligibility(Default::default(), subject.thresholds());
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubjectResponse::new(subject, eligibility),
        }),
    ))
}

/// GET /api/v1/subjects/{id}
pub async fn get_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubjectResponse>>> {
    let subject = ensure_subject_owned(&state.pool, auth.user_id, id).await?;
    let tally = AttendanceRepo::tally_for_subject(&state.pool, id).await?;
    let eligibility = evaluate_eligibility(tally, subject.thresholds());
    Ok(Json(DataResponse {
        data: SubjectResponse::new(subject, eligibility),
    }))
}

/// PUT /api/v1/subjects/{id}
pub async fn update_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubjectRequest>,
) -> AppResult<Json<DataResponse<SubjectResponse>>> {
    let input = input.validated()?;
    let subject = SubjectRepo::update(
        &state.pool,
        auth.user_id,
        id,
        &UpdateSubject {
            name: input.name,
            credits: input.credits,
            attendance_required_percent: input.attendance_required_percent,
            attendance_weight: input.attendance_weight,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id,
    }))?;

    tracing::info!(user_id = auth.user_id, subject_id = id, "Subject updated");
    let tally = AttendanceRepo::tally_for_subject(&state.pool, id).await?;
    let eligibility = evaluate_eligibility(tally, subject.thresholds());
    Ok(Json(DataResponse {
        data: SubjectResponse::new(subject, eligibility),
    }))
}

/// DELETE /api/v1/subjects/{id}
///
/// Attendance, deadlines and timetable rows go with the subject.
pub async fn delete_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubjectRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }));
    }
    tracing::info!(user_id = auth.user_id, subject_id = id, "Subject deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/subjects/{id}/calendar?year=&month=
pub async fn subject_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<DataResponse<SubjectCalendarResponse>>> {
    let subject = ensure_subject_owned(&state.pool, auth.user_id, id).await?;
    let month = params.resolve(today())?;

    let attendance = AttendanceRepo::list_for_subject_between(
        &state.pool,
        id,
        month.first_day(),
        month.last_day(),
    )
    .await?
    .into_iter()
    .map(|record| (record.date, record.status))
    .collect();

    Ok(Json(DataResponse {
        data: SubjectCalendarResponse {
            subject_id: subject.id,
            subject_name: subject.name,
            month: month.into(),
            attendance,
        },
    }))
}
