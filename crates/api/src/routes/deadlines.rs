//! Route definitions for the `/deadlines` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::deadlines;
use crate::state::AppState;

/// Routes mounted at `/deadlines`.
///
/// ```text
/// GET    /       -> list_deadlines
/// POST   /       -> create_deadline
/// PUT    /{id}   -> update_deadline
/// DELETE /{id}   -> delete_deadline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(deadlines::list_deadlines).post(deadlines::create_deadline),
        )
        .route(
            "/{id}",
            put(deadlines::update_deadline).delete(deadlines::delete_deadline),
        )
}
