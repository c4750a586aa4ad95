//! Per-subject risk classification for the weekly danger list.

use chrono::NaiveDate;
use serde::Serialize;

use crate::deadline::{has_assignment_overload, has_urgent_deadline, DeadlineSnapshot};

/// A subject at or below this percentage is flagged for low attendance.
pub const LOW_ATTENDANCE_PCT: f64 = 80.0;

/// Why a subject needs attention. Variants are declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskReason {
    #[serde(rename = "Low attendance")]
    LowAttendance,
    #[serde(rename = "Urgent deadline")]
    UrgentDeadline,
    #[serde(rename = "Assignment overload")]
    AssignmentOverload,
}

impl RiskReason {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LowAttendance => "Low attendance",
            Self::UrgentDeadline => "Urgent deadline",
            Self::AssignmentOverload => "Assignment overload",
        }
    }
}

/// Outcome of [`classify_risk`] for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub reasons: Vec<RiskReason>,
}

impl RiskAssessment {
    pub fn is_at_risk(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Flag a subject from its attendance percentage and its deadlines.
///
/// Reasons are always emitted in the order low attendance, urgent deadline,
/// assignment overload.
pub fn classify_risk(
    attendance_pct: f64,
    deadlines: &[DeadlineSnapshot],
    today: NaiveDate,
) -> RiskAssessment {
    let mut reasons = Vec::with_capacity(3);
    if attendance_pct <= LOW_ATTENDANCE_PCT {
        reasons.push(RiskReason::LowAttendance);
    }
    if has_urgent_deadline(deadlines, today) {
        reasons.push(RiskReason::UrgentDeadline);
    }
    if has_assignment_overload(deadlines) {
        reasons.push(RiskReason::AssignmentOverload);
    }
    RiskAssessment { reasons }
}
