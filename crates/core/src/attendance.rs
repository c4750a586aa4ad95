//! Attendance percentage and skip-budget computation.
//!
//! The functions here operate on an [`AttendanceTally`] that the caller has
//! already fetched. Cancelled classes never reach a tally: they are dropped
//! by [`AttendanceTally::from_statuses`] and filtered out by the repository
//! queries that build tallies directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::subject::{SubjectThresholds, DEFAULT_REQUIRED_PERCENT};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PRESENT: &str = "present";
pub const STATUS_ABSENT: &str = "absent";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid attendance status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_ABSENT, STATUS_CANCELLED];

/// Percentage returned for a subject with no eligible hours yet.
pub const NO_CLASSES_PERCENTAGE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Outcome recorded for one subject on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Cancelled,
}

impl AttendanceStatus {
    /// Convert from a database / path string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PRESENT => Ok(Self::Present),
            STATUS_ABSENT => Ok(Self::Absent),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid attendance status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => STATUS_PRESENT,
            Self::Absent => STATUS_ABSENT,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Whether this record counts towards percentages and skip budgets.
    pub fn is_eligible(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Counts of non-cancelled classes for one subject (or one time window).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceTally {
    /// Non-cancelled classes recorded.
    pub total: i64,
    /// Of those, classes marked present.
    pub present: i64,
}

impl AttendanceTally {
    pub fn new(total: i64, present: i64) -> Self {
        Self { total, present }
    }

    /// Build a tally from raw statuses, skipping cancelled classes.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        statuses
            .into_iter()
            .filter(AttendanceStatus::is_eligible)
            .fold(Self::default(), |mut acc, status| {
                acc.total += 1;
                if status == AttendanceStatus::Present {
                    acc.present += 1;
                }
                acc
            })
    }

    /// Classes missed so far.
    pub fn absences(&self) -> i64 {
        (self.total - self.present).max(0)
    }
}

/// Derived eligibility figures for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Eligibility {
    /// Weighted attendance percentage, two-decimal precision.
    pub percentage: f64,
    /// Further classes that may be missed while staying at or above the requirement.
    pub skip_budget: i64,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Weighted attendance percentage, rounded to two decimals.
///
/// Every eligible class counts `weight` hours towards the denominator and,
/// when present, towards the numerator. Returns exactly `100.0` when there
/// are no eligible hours.
pub fn attendance_percentage(tally: AttendanceTally, weight: f64) -> f64 {
    let total_hours = tally.total as f64 * weight;
    if total_hours <= 0.0 || !total_hours.is_finite() {
        return NO_CLASSES_PERCENTAGE;
    }
    let present_hours = tally.present as f64 * weight;
    round_to(present_hours / total_hours * 100.0, 2)
}

/// Number of further classes that can be skipped while staying at or above
/// `required_percent`.
///
/// `max_absences = floor((100 - required) * total / required)`, and the
/// result is `max(0, max_absences - absences)`. Returns 0 when nothing has
/// been recorded. A non-positive or non-finite requirement falls back to
/// [`DEFAULT_REQUIRED_PERCENT`]; anything above 100 is treated as 100.
pub fn skip_budget(tally: AttendanceTally, required_percent: f64) -> i64 {
    if tally.total <= 0 {
        return 0;
    }
    let required = if required_percent.is_finite() && required_percent > 0.0 {
        required_percent.min(100.0)
    } else {
        DEFAULT_REQUIRED_PERCENT
    };

    let max_absences = ((100.0 - required) * tally.total as f64 / required).floor() as i64;
    (max_absences - tally.absences()).max(0)
}

/// Percentage and skip budget for a subject in one call.
pub fn evaluate_eligibility(tally: AttendanceTally, thresholds: SubjectThresholds) -> Eligibility {
    Eligibility {
        percentage: attendance_percentage(tally, thresholds.weight),
        skip_budget: skip_budget(tally, thresholds.required_percent),
    }
}

/// Whole-number percentage for a time window (weekly or monthly views).
///
/// Unlike [`attendance_percentage`], an empty window reads as `0`.
pub fn window_percentage(tally: AttendanceTally) -> i64 {
    if tally.total <= 0 {
        return 0;
    }
    (tally.present as f64 / tally.total as f64 * 100.0).round() as i64
}

/// Mean of per-subject percentages rounded to one decimal; `0` for no subjects.
pub fn overall_attendance(percentages: &[f64]) -> f64 {
    if percentages.is_empty() {
        return 0.0;
    }
    let sum: f64 = percentages.iter().sum();
    round_to(sum / percentages.len() as f64, 1)
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

/// Whether the month's attendance keeps the user above their minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStatus {
    Safe,
    AtRisk,
}

/// Aggregate view of one calendar month across all of a user's subjects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total: i64,
    pub present: i64,
    /// Whole-number percentage for the month, `0` when nothing was recorded.
    pub percentage: i64,
    /// Presents needed for `total` classes to satisfy the minimum.
    pub required_presents: i64,
    /// Classes that could have been missed this month.
    pub can_miss: i64,
    pub min_required: f64,
    pub status: MonthStatus,
}

/// Summarise a month against the user's minimum attendance.
pub fn month_summary(tally: AttendanceTally, min_required: f64) -> MonthSummary {
    let percentage = window_percentage(tally);
    let required_presents = (tally.total as f64 * min_required / 100.0).ceil() as i64;
    let can_miss = (tally.total - required_presents).max(0);
    let status = if (percentage as f64) < min_required {
        MonthStatus::AtRisk
    } else {
        MonthStatus::Safe
    };

    MonthSummary {
        total: tally.total,
        present: tally.present,
        percentage,
        required_presents,
        can_miss,
        min_required,
        status,
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Attendance counts for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTally {
    pub date: NaiveDate,
    pub tally: AttendanceTally,
}

/// Per-day present percentages in date order, rounded to whole numbers.
///
/// Days without eligible classes are skipped.
pub fn daily_trend(days: &[DailyTally]) -> Vec<i64> {
    let mut sorted: Vec<&DailyTally> = days.iter().filter(|d| d.tally.total > 0).collect();
    sorted.sort_by_key(|d| d.date);
    sorted
        .into_iter()
        .map(|d| window_percentage(d.tally))
        .collect()
}
