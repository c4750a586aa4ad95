//! Handler for sending the caller's weekly report by email.

use axum::extract::State;
use axum::http::StatusCode;
use survivor_core::error::CoreError;
use survivor_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::summary::{today, weekly_report};

/// POST /api/v1/reports/weekly
///
/// 400 when email delivery is not configured or the user has no address.
pub async fn send_weekly_report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<StatusCode> {
    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Email delivery is not configured".into()))?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let email = user
        .email
        .clone()
        .ok_or_else(|| AppError::BadRequest("Add an email address to receive reports".into()))?;

    let report = weekly_report(&state.pool, &user, today()).await?;
    mailer
        .send_weekly_report(&email, &report)
        .await
        .map_err(|e| AppError::InternalError(format!("Weekly report delivery failed: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
