//! Dashboard insight: a one-line verdict on overall and week-over-week attendance.

use serde::Serialize;

use crate::attendance::{window_percentage, AttendanceTally};

/// Below this overall percentage attendance is critically low.
pub const CRITICAL_PCT: f64 = 75.0;

/// Below this overall percentage attendance needs attention.
pub const ATTENTION_PCT: f64 = 80.0;

/// Dashboard "at risk" counter threshold (strictly below).
pub const DASHBOARD_AT_RISK_PCT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    NoData,
    CriticallyLow,
    NeedsAttention,
    Improved,
    Dropped,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Positive,
    Warning,
    Critical,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoData => "No attendance data yet",
            Self::CriticallyLow => "Attendance is critically low",
            Self::NeedsAttention => "Attendance needs attention",
            Self::Improved => "You attended more classes than last week",
            Self::Dropped => "Attendance dropped compared to last week",
            Self::Unchanged => "Attendance stayed the same as last week",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoData | Self::Unchanged => Severity::Info,
            Self::Improved => Severity::Positive,
            Self::NeedsAttention | Self::Dropped => Severity::Warning,
            Self::CriticallyLow => Severity::Critical,
        }
    }
}

/// Classify the dashboard state. First matching rule wins:
/// no data, critically low, needs attention, then the weekly comparison.
pub fn dashboard_insight(overall_pct: f64, weekly_pct: i64, last_week_pct: i64) -> Insight {
    if overall_pct == 0.0 {
        Insight::NoData
    } else if overall_pct < CRITICAL_PCT {
        Insight::CriticallyLow
    } else if overall_pct < ATTENTION_PCT {
        Insight::NeedsAttention
    } else if weekly_pct > last_week_pct {
        Insight::Improved
    } else if weekly_pct < last_week_pct {
        Insight::Dropped
    } else {
        Insight::Unchanged
    }
}

/// Last week's percentage, or this week's when last week has no records.
pub fn last_week_percentage(last_week: AttendanceTally, weekly_pct: i64) -> i64 {
    if last_week.total > 0 {
        window_percentage(last_week)
    } else {
        weekly_pct
    }
}

/// Number of subjects strictly below [`DASHBOARD_AT_RISK_PCT`].
pub fn count_at_risk(percentages: &[f64]) -> usize {
    percentages
        .iter()
        .filter(|pct| **pct < DASHBOARD_AT_RISK_PCT)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_overall_means_no_data_whatever_the_week() {
        assert_eq!(dashboard_insight(0.0, 90, 10), Insight::NoData);
        assert_eq!(dashboard_insight(0.0, 0, 100), Insight::NoData);
    }

    #[test]
    fn thresholds_take_priority_over_trend() {
        assert_eq!(dashboard_insight(74.9, 100, 0), Insight::CriticallyLow);
        assert_eq!(dashboard_insight(75.0, 100, 0), Insight::NeedsAttention);
        assert_eq!(dashboard_insight(79.9, 0, 100), Insight::NeedsAttention);
    }

    #[test]
    fn weekly_comparison() {
        assert_eq!(dashboard_insight(90.0, 80, 70), Insight::Improved);
        assert_eq!(dashboard_insight(90.0, 70, 80), Insight::Dropped);
        assert_eq!(dashboard_insight(90.0, 80, 80), Insight::Unchanged);
    }

    #[test]
    fn empty_last_week_mirrors_this_week() {
        let pct = last_week_percentage(AttendanceTally::default(), 64);
        assert_eq!(pct, 64);
        assert_eq!(dashboard_insight(85.0, 64, pct), Insight::Unchanged);
        assert_eq!(last_week_percentage(AttendanceTally::new(4, 1), 64), 25);
    }

    #[test]
    fn severity_follows_insight() {
        assert_eq!(Insight::CriticallyLow.severity(), Severity::Critical);
        assert_eq!(Insight::Dropped.severity(), Severity::Warning);
        assert_eq!(Insight::Improved.severity(), Severity::Positive);
    }

    #[test]
    fn at_risk_counter_is_strict() {
        assert_eq!(count_at_risk(&[80.0, 79.99, 100.0, 12.0]), 2);
    }
}
