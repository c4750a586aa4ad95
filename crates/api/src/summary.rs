//! Per-user attendance aggregates shared by the dashboard, the risk list,
//! and the weekly report (HTTP and scheduled).
//!
//! Everything here fetches rows through the repositories and hands plain
//! snapshots to `survivor_core`; `today` is always passed in.

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;
use survivor_core::attendance::{
    evaluate_eligibility, overall_attendance, window_percentage, AttendanceTally, Eligibility,
};
use survivor_core::deadline::DeadlineSnapshot;
use survivor_core::insight::last_week_percentage;
use survivor_core::risk::{classify_risk, RiskReason};
use survivor_core::types::DbId;
use survivor_db::models::subject::Subject;
use survivor_db::models::user::User;
use survivor_db::repositories::{AttendanceRepo, DeadlineRepo, SubjectRepo};
use survivor_mail::{AtRiskSubject, WeeklyReport};

/// Length of the "this week" window, today included.
pub const WEEK_DAYS: i64 = 7;

/// The current calendar day in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A subject with its all-time tally and eligibility.
#[derive(Debug, Clone)]
pub struct SubjectStanding {
    pub subject: Subject,
    pub tally: AttendanceTally,
    pub eligibility: Eligibility,
}

/// A subject flagged by the risk classifier.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectRisk {
    pub subject_id: DbId,
    pub subject_name: String,
    pub percentage: f64,
    pub reasons: Vec<RiskReason>,
}

/// Whole-number attendance for this week and last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyPercentages {
    pub this_week: i64,
    /// Equals `this_week` when last week has no records.
    pub last_week: i64,
}

/// Eligibility of every subject the user owns, in creation order.
pub async fn subject_standings(
    pool: &PgPool,
    user_id: DbId,
) -> Result<Vec<SubjectStanding>, sqlx::Error> {
    let subjects = SubjectRepo::list_for_user(pool, user_id).await?;
    let tallies: HashMap<DbId, AttendanceTally> = AttendanceRepo::tallies_for_user(pool, user_id)
        .await?
        .into_iter()
        .map(|row| (row.subject_id, row.tally()))
        .collect();

    Ok(subjects
        .into_iter()
        .map(|subject| {
            let tally = tallies.get(&subject.id).copied().unwrap_or_default();
            let eligibility = evaluate_eligibility(tally, subject.thresholds());
            SubjectStanding {
                subject,
                tally,
                eligibility,
            }
        })
        .collect())
}

/// Mean of the per-subject percentages (one decimal, 0 with no subjects).
pub fn overall_from(standings: &[SubjectStanding]) -> f64 {
    let percentages: Vec<f64> = standings.iter().map(|s| s.eligibility.percentage).collect();
    overall_attendance(&percentages)
}

/// Attendance over the last 7 days against the 7 days before that.
pub async fn weekly_percentages(
    pool: &PgPool,
    user_id: DbId,
    today: NaiveDate,
) -> Result<WeeklyPercentages, sqlx::Error> {
    let week_start = today - Duration::days(WEEK_DAYS - 1);
    let this_week =
        AttendanceRepo::tally_for_user_between(pool, user_id, week_start, today).await?;
    let last_week = AttendanceRepo::tally_for_user_between(
        pool,
        user_id,
        today - Duration::days(2 * WEEK_DAYS - 1),
        week_start - Duration::days(1),
    )
    .await?;

    let this_week = window_percentage(this_week);
    Ok(WeeklyPercentages {
        this_week,
        last_week: last_week_percentage(last_week, this_week),
    })
}

/// Subjects with at least one risk reason, in creation order.
pub async fn at_risk_subjects(
    pool: &PgPool,
    standings: &[SubjectStanding],
    user_id: DbId,
    today: NaiveDate,
) -> Result<Vec<SubjectRisk>, sqlx::Error> {
    let mut deadlines: HashMap<DbId, Vec<DeadlineSnapshot>> = HashMap::new();
    for deadline in DeadlineRepo::list_pending_for_user(pool, user_id).await? {
        deadlines
            .entry(deadline.subject_id)
            .or_default()
            .push(deadline.snapshot());
    }

    Ok(standings
        .iter()
        .filter_map(|standing| {
            let snapshots = deadlines
                .get(&standing.subject.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let assessment = classify_risk(standing.eligibility.percentage, snapshots, today);
            assessment.is_at_risk().then(|| SubjectRisk {
                subject_id: standing.subject.id,
                subject_name: standing.subject.name.clone(),
                percentage: standing.eligibility.percentage,
                reasons: assessment.reasons,
            })
        })
        .collect())
}

/// Assemble the weekly report of one user.
pub async fn weekly_report(
    pool: &PgPool,
    user: &User,
    today: NaiveDate,
) -> Result<WeeklyReport, sqlx::Error> {
    let standings = subject_standings(pool, user.id).await?;
    let weekly = weekly_percentages(pool, user.id, today).await?;
    let at_risk = at_risk_subjects(pool, &standings, user.id, today).await?;

    Ok(WeeklyReport {
        user_name: user.name.clone(),
        weekly_percentage: weekly.this_week,
        overall_attendance: overall_from(&standings),
        at_risk: at_risk
            .into_iter()
            .map(|risk| AtRiskSubject {
                name: risk.subject_name,
                reasons: risk.reasons,
            })
            .collect(),
    })
}
