pub mod account;
pub mod attendance;
pub mod auth;
pub mod deadlines;
pub mod health;
pub mod subjects;
pub mod timetable;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/forgot-password                            reset password by name (public)
/// /auth/logout                                     logout (requires auth)
///
/// /account                                         get, update, delete
/// /account/settings                                get, update minimum attendance
///
/// /subjects                                        list, create
/// /subjects/{id}                                   get, update, delete
/// /subjects/{id}/calendar                          month calendar (GET)
///
/// /attendance                                      mark a date (POST)
/// /attendance/overview                             monthly overview (GET)
/// /attendance/today/{subject_id}/{status}          mark today (POST)
///
/// /deadlines                                       list, create
/// /deadlines/{id}                                  update, delete
///
/// /timetable                                       weekly slots and extra classes (GET)
/// /timetable/extra                                 add extra class (POST)
/// /timetable/{subject_id}                          replace weekly slots (PUT)
///
/// /dashboard                                       dashboard summary (GET)
/// /risk/weekly                                     weekly danger list (GET)
/// /reports/weekly                                  email weekly report (POST)
/// /analytics/clicks/{page}                         log a page click (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/account", account::router())
        .nest("/subjects", subjects::router())
        .nest("/attendance", attendance::router())
        .nest("/deadlines", deadlines::router())
        .nest("/timetable", timetable::router())
        // Single-endpoint read models.
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/risk/weekly", get(handlers::risk::weekly_risk))
        .route("/reports/weekly", post(handlers::reports::send_weekly_report))
        .route(
            "/analytics/clicks/{page}",
            post(handlers::analytics::log_click),
        )
}
