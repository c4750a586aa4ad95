//! Weekly attendance report rendered as a plain-text email.

use std::fmt::Write;

use survivor_core::risk::RiskReason;

/// Subject line of every weekly report.
pub const WEEKLY_REPORT_SUBJECT: &str = "Your Weekly Attendance Report";

/// A subject flagged by the risk classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRiskSubject {
    pub name: String,
    pub reasons: Vec<RiskReason>,
}

/// Everything the weekly email says about one user.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub user_name: String,
    /// Whole-number percentage over the last 7 days.
    pub weekly_percentage: i64,
    /// Mean of the per-subject percentages, one decimal.
    pub overall_attendance: f64,
    pub at_risk: Vec<AtRiskSubject>,
}

impl WeeklyReport {
    /// Render the plain-text body.
    pub fn body(&self) -> String {
        let mut body = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(body, "Hello {},", self.user_name);
        let _ = writeln!(body);
        let _ = writeln!(
            body,
            "Here is your weekly attendance summary from College Survivor."
        );
        let _ = writeln!(body);
        let _ = writeln!(body, "This week: {}%", self.weekly_percentage);
        let _ = writeln!(body, "Overall:   {:.1}%", self.overall_attendance);
        let _ = writeln!(body);

        if self.at_risk.is_empty() {
            let _ = writeln!(body, "No subjects need attention right now.");
        } else {
            let _ = writeln!(body, "Subjects that need attention:");
            for subject in &self.at_risk {
                let reasons: Vec<&str> = subject.reasons.iter().map(RiskReason::label).collect();
                let _ = writeln!(body, "  - {}: {}", subject.name, reasons.join(", "));
            }
        }

        let _ = writeln!(body);
        let _ = writeln!(body, "Keep pushing!");
        body
    }
}
