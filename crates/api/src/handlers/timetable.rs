//! Handlers for the `/timetable` resource: weekly slots and extra classes.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use survivor_core::timetable::normalize_weekdays;
use survivor_core::types::DbId;
use survivor_db::models::timetable::{CreateExtraClass, TimetableEntry};
use survivor_db::repositories::{SubjectRepo, TimetableRepo};

use crate::error::AppResult;
use crate::handlers::ensure_subject_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubjectRef {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub subjects: Vec<SubjectRef>,
    /// subject id -> weekdays (Monday = 0), sorted.
    pub weekdays: BTreeMap<DbId, Vec<i16>>,
    pub extra_classes: Vec<TimetableEntry>,
}

/// Request body for `PUT /timetable/{subject_id}`.
#[derive(Debug, Deserialize)]
pub struct SetWeekdaysRequest {
    pub weekdays: Vec<i16>,
}

/// GET /api/v1/timetable
pub async fn get_timetable(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<TimetableResponse>>> {
    let subjects = SubjectRepo::list_for_user(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(|s| SubjectRef {
            id: s.id,
            name: s.name,
        })
        .collect();

    let mut weekdays: BTreeMap<DbId, Vec<i16>> = BTreeMap::new();
    let mut extra_classes = Vec::new();
    for entry in TimetableRepo::list_for_user(&state.pool, auth.user_id).await? {
        if entry.is_extra {
            extra_classes.push(entry);
        } else {
            weekdays.entry(entry.subject_id).or_default().push(entry.weekday);
        }
    }

    Ok(Json(DataResponse {
        data: TimetableResponse {
            subjects,
            weekdays,
            extra_classes,
        },
    }))
}

/// PUT /api/v1/timetable/{subject_id}
///
/// Replace the subject's weekly slots. An empty list clears them.
pub async fn set_weekdays(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<DbId>,
    Json(input): Json<SetWeekdaysRequest>,
) -> AppResult<Json<DataResponse<Vec<i16>>>> {
    let weekdays = normalize_weekdays(&input.weekdays)?;
    ensure_subject_owned(&state.pool, auth.user_id, subject_id).await?;

    let entries =
        TimetableRepo::replace_weekdays(&state.pool, auth.user_id, subject_id, &weekdays).await?;

    tracing::info!(user_id = auth.user_id, subject_id, ?weekdays, "Timetable updated");
    Ok(Json(DataResponse {
        data: entries.into_iter().map(|e| e.weekday).collect(),
    }))
}

/// POST /api/v1/timetable/extra
pub async fn add_extra_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateExtraClass>,
) -> AppResult<(StatusCode, Json<DataResponse<TimetableEntry>>)> {
    ensure_subject_owned(&state.pool, auth.user_id, input.subject_id).await?;
    let entry = TimetableRepo::add_extra(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        subject_id = input.subject_id,
        class_date = %input.class_date,
        "Extra class added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
