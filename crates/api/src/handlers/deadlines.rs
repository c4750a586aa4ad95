//! Handlers for the `/deadlines` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use survivor_core::deadline::{DeadlineType, MAX_TITLE_LENGTH};
use survivor_core::error::CoreError;
use survivor_core::types::DbId;
use survivor_db::models::deadline::{CreateDeadline, Deadline, DeadlineWithSubject, UpdateDeadline};
use survivor_db::repositories::DeadlineRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_subject_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /deadlines`.
#[derive(Debug, Deserialize)]
pub struct CreateDeadlineRequest {
    pub subject_id: DbId,
    pub title: String,
    pub due_date: NaiveDate,
    /// `assignment`, `exam` or `other` (default).
    #[serde(rename = "type")]
    pub deadline_type: Option<String>,
}

/// Request body for `PUT /deadlines/{id}`. Omitted fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateDeadlineRequest {
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub deadline_type: Option<String>,
    pub completed: Option<bool>,
}

/// GET /api/v1/deadlines
///
/// All of the user's deadlines with subject names, soonest first.
pub async fn list_deadlines(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DeadlineWithSubject>>>> {
    let data = DeadlineRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/deadlines
pub async fn create_deadline(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateDeadlineRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Deadline>>)> {
    let title = validate_title(&input.title)?;
    let deadline_type = input
        .deadline_type
        .as_deref()
        .map(parse_type)
        .transpose()?
        .unwrap_or(DeadlineType::Other);
    ensure_subject_owned(&state.pool, auth.user_id, input.subject_id).await?;

    let deadline = DeadlineRepo::create(
        &state.pool,
        &CreateDeadline {
            subject_id: input.subject_id,
            title,
            due_date: input.due_date,
            deadline_type,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        subject_id = deadline.subject_id,
        deadline_id = deadline.id,
        "Deadline created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: deadline })))
}

/// PUT /api/v1/deadlines/{id}
pub async fn update_deadline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeadlineRequest>,
) -> AppResult<Json<DataResponse<Deadline>>> {
    let update = UpdateDeadline {
        title: input.title.as_deref().map(validate_title).transpose()?,
        due_date: input.due_date,
        deadline_type: input.deadline_type.as_deref().map(parse_type).transpose()?,
        completed: input.completed,
    };

    let deadline = DeadlineRepo::update(&state.pool, auth.user_id, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deadline",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, deadline_id = id, "Deadline updated");
    Ok(Json(DataResponse { data: deadline }))
}

/// DELETE /api/v1/deadlines/{id}
pub async fn delete_deadline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DeadlineRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Deadline",
            id,
        }));
    }
    tracing::info!(user_id = auth.user_id, deadline_id = id, "Deadline deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Deadline title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Deadline title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

fn parse_type(raw: &str) -> AppResult<DeadlineType> {
    DeadlineType::from_str_value(raw).map_err(AppError::BadRequest)
}
