//! Route definitions for the `/timetable` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::timetable;
use crate::state::AppState;

/// Routes mounted at `/timetable`.
///
/// ```text
/// GET  /               -> get_timetable
/// POST /extra          -> add_extra_class
/// PUT  /{subject_id}   -> set_weekdays
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timetable::get_timetable))
        .route("/extra", post(timetable::add_extra_class))
        .route("/{subject_id}", put(timetable::set_weekdays))
}
