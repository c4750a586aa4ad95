//! Handlers for the signed-in user's account: profile, activity summary,
//! settings, and account deletion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use survivor_core::attendance::{daily_trend, DailyTally};
use survivor_core::error::CoreError;
use survivor_core::subject::validate_required_percent;
use survivor_db::models::settings::min_attendance_or_default;
use survivor_db::models::user::{UpdateUser, UserResponse};
use survivor_db::repositories::{AttendanceRepo, DeadlineRepo, SettingsRepo, SubjectRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Totals shown on the profile page.
#[derive(Debug, Serialize)]
pub struct ActivitySummary {
    pub total_subjects: i64,
    pub total_deadlines: i64,
    /// Non-cancelled attendance records.
    pub total_attendance: i64,
    /// Daily present percentage over the whole history, oldest first.
    pub attendance_trend: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub activity: ActivitySummary,
}

/// Request body for `PUT /account`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub min_attendance: f64,
}

/// Request body for `PUT /account/settings`.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub min_attendance: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/account
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let total_subjects = SubjectRepo::count_for_user(&state.pool, auth.user_id).await?;
    let total_deadlines = DeadlineRepo::count_for_user(&state.pool, auth.user_id).await?;
    let total_attendance = AttendanceRepo::count_for_user(&state.pool, auth.user_id).await?;
    let days: Vec<DailyTally> = AttendanceRepo::daily_rates_for_user(&state.pool, auth.user_id, None)
        .await?
        .into_iter()
        .map(DailyTally::from)
        .collect();

    Ok(Json(DataResponse {
        data: AccountResponse {
            user: user.into(),
            activity: ActivitySummary {
                total_subjects,
                total_deadlines,
                total_attendance,
                attendance_trend: daily_trend(&days),
            },
        },
    }))
}

/// PUT /api/v1/account
///
/// Update name and/or email. A name already taken is a 409.
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<UpdateAccountRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.name = input.name.map(|n| n.trim().to_string());
    input.email = normalize_email(input.email);
    input.validate()?;

    let user = UserRepo::update(
        &state.pool,
        auth.user_id,
        &UpdateUser {
            name: input.name,
            email: input.email,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth.user_id,
    }))?;

    tracing::info!(user_id = user.id, "Account updated");
    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/account
///
/// Delete the user and everything they own.
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }));
    }
    tracing::info!(user_id = auth.user_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/account/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<SettingsResponse>>> {
    let settings = SettingsRepo::find(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: SettingsResponse {
            min_attendance: min_attendance_or_default(settings.as_ref()),
        },
    }))
}

/// PUT /api/v1/account/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateSettingsRequest>,
) -> AppResult<Json<DataResponse<SettingsResponse>>> {
    validate_required_percent(input.min_attendance)?;
    let settings = SettingsRepo::upsert(&state.pool, auth.user_id, input.min_attendance).await?;
    Ok(Json(DataResponse {
        data: SettingsResponse {
            min_attendance: settings.min_attendance,
        },
    }))
}
