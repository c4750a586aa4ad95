//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /                              -> mark_attendance
/// GET  /overview                      -> overview
/// POST /today/{subject_id}/{status}   -> mark_today
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(attendance::mark_attendance))
        .route("/overview", get(attendance::overview))
        .route("/today/{subject_id}/{status}", post(attendance::mark_today))
}
