//! Handler for the weekly danger list.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::summary::{at_risk_subjects, subject_standings, today, SubjectRisk};

/// GET /api/v1/risk/weekly
///
/// Subjects with at least one risk reason. Reasons are listed in the order
/// low attendance, urgent deadline, assignment overload.
pub async fn weekly_risk(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SubjectRisk>>>> {
    let standings = subject_standings(&state.pool, auth.user_id).await?;
    let data = at_risk_subjects(&state.pool, &standings, auth.user_id, today()).await?;
    Ok(Json(DataResponse { data }))
}
