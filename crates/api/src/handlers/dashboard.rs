//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use chrono::Duration;
use serde::Serialize;
use survivor_core::attendance::{daily_trend, DailyTally};
use survivor_core::deadline::UPCOMING_WINDOW_DAYS;
use survivor_core::insight::{count_at_risk, dashboard_insight, Insight, Severity};
use survivor_db::models::deadline::DeadlineWithSubject;
use survivor_db::repositories::{AttendanceRepo, DeadlineRepo, TimetableRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::summary::{overall_from, subject_standings, today, weekly_percentages, WEEK_DAYS};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Subjects strictly below 80%.
    pub subjects_at_risk: usize,
    pub safe_subjects: usize,
    pub overall_attendance: f64,
    pub weekly_attendance: i64,
    pub last_week_attendance: i64,
    pub insight: Insight,
    pub insight_message: &'static str,
    pub insight_severity: Severity,
    /// Incomplete deadlines due within the next 7 days.
    pub urgent_deadlines: Vec<DeadlineWithSubject>,
    /// Weekly timetable slots falling on today.
    pub todays_classes: usize,
    /// Daily present percentage for the last 7 days.
    pub attendance_trend: Vec<i64>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let today = today();

    let standings = subject_standings(&state.pool, auth.user_id).await?;
    let percentages: Vec<f64> = standings.iter().map(|s| s.eligibility.percentage).collect();
    let subjects_at_risk = count_at_risk(&percentages);
    let overall_attendance = overall_from(&standings);

    let weekly = weekly_percentages(&state.pool, auth.user_id, today).await?;
    let insight = dashboard_insight(overall_attendance, weekly.this_week, weekly.last_week);

    let urgent_deadlines = DeadlineRepo::list_pending_between(
        &state.pool,
        auth.user_id,
        today,
        today + Duration::days(UPCOMING_WINDOW_DAYS),
    )
    .await?;

    let todays_classes = TimetableRepo::list_for_user(&state.pool, auth.user_id)
        .await?
        .iter()
        .filter(|entry| entry.slot().is_regular_on(today))
        .count();

    let days: Vec<DailyTally> = AttendanceRepo::daily_rates_for_user(
        &state.pool,
        auth.user_id,
        Some(today - Duration::days(WEEK_DAYS - 1)),
    )
    .await?
    .into_iter()
    .map(DailyTally::from)
    .collect();

    Ok(Json(DataResponse {
        data: DashboardResponse {
            subjects_at_risk,
            safe_subjects: standings.len() - subjects_at_risk,
            overall_attendance,
            weekly_attendance: weekly.this_week,
            last_week_attendance: weekly.last_week,
            insight,
            insight_message: insight.message(),
            insight_severity: insight.severity(),
            urgent_deadlines,
            todays_classes,
            attendance_trend: daily_trend(&days),
        },
    }))
}
