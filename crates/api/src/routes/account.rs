//! Route definitions for the `/account` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET    /           -> get_account
/// PUT    /           -> update_account
/// DELETE /           -> delete_account
/// GET    /settings   -> get_settings
/// PUT    /settings   -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(account::get_account)
                .put(account::update_account)
                .delete(account::delete_account),
        )
        .route(
            "/settings",
            get(account::get_settings).put(account::update_settings),
        )
}
