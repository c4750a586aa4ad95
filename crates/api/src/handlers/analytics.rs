//! Handler for page click logging.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use survivor_db::repositories::ClickLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Longest page name accepted in the click log.
const MAX_PAGE_LENGTH: usize = 100;

/// POST /api/v1/analytics/clicks/{page}
pub async fn log_click(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(page): Path<String>,
) -> AppResult<StatusCode> {
    let page = page.trim();
    if page.is_empty() || page.chars().count() > MAX_PAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Page name must be 1-{MAX_PAGE_LENGTH} characters"
        )));
    }
    ClickLogRepo::create(&state.pool, auth.user_id, page).await?;
    tracing::debug!(user_id = auth.user_id, page, "Click logged");
    Ok(StatusCode::NO_CONTENT)
}
