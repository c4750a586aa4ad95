//! Deadline kinds and the deadline-derived risk predicates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TYPE_ASSIGNMENT: &str = "assignment";
pub const TYPE_EXAM: &str = "exam";
pub const TYPE_OTHER: &str = "other";

/// All valid deadline type strings.
pub const VALID_DEADLINE_TYPES: &[&str] = &[TYPE_ASSIGNMENT, TYPE_EXAM, TYPE_OTHER];

/// An incomplete deadline due within this many days (inclusive) is urgent.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// More than this many open assignments on one subject is an overload.
pub const ASSIGNMENT_OVERLOAD_THRESHOLD: usize = 2;

/// Days ahead covered by the dashboard's urgent deadline list.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Maximum length of a deadline title.
pub const MAX_TITLE_LENGTH: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineType {
    Assignment,
    Exam,
    Other,
}

impl DeadlineType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_ASSIGNMENT => Ok(Self::Assignment),
            TYPE_EXAM => Ok(Self::Exam),
            TYPE_OTHER => Ok(Self::Other),
            _ => Err(format!(
                "Invalid deadline type '{s}'. Must be one of: {}",
                VALID_DEADLINE_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => TYPE_ASSIGNMENT,
            Self::Exam => TYPE_EXAM,
            Self::Other => TYPE_OTHER,
        }
    }
}

/// The slice of a deadline row the risk rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineSnapshot {
    pub due_date: NaiveDate,
    pub completed: bool,
    pub kind: DeadlineType,
}

/// Whether `due` falls within `[today, today + days]`.
fn due_within(due: NaiveDate, today: NaiveDate, days: i64) -> bool {
    let days_left = (due - today).num_days();
    (0..=days).contains(&days_left)
}

/// True if any incomplete deadline is due within [`URGENT_WINDOW_DAYS`] of `today`.
pub fn has_urgent_deadline(deadlines: &[DeadlineSnapshot], today: NaiveDate) -> bool {
    deadlines
        .iter()
        .any(|d| !d.completed && due_within(d.due_date, today, URGENT_WINDOW_DAYS))
}

/// True if more than [`ASSIGNMENT_OVERLOAD_THRESHOLD`] assignments are still open.
pub fn has_assignment_overload(deadlines: &[DeadlineSnapshot]) -> bool {
    let open_assignments = deadlines
        .iter()
        .filter(|d| !d.completed && d.kind == DeadlineType::Assignment)
        .count();
    open_assignments > ASSIGNMENT_OVERLOAD_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
    }

    fn due_in(days: i64, kind: DeadlineType, completed: bool) -> DeadlineSnapshot {
        DeadlineSnapshot {
            due_date: today() + Duration::days(days),
            completed,
            kind,
        }
    }

    #[test]
    fn due_in_two_days_is_urgent() {
        let deadlines = [due_in(2, DeadlineType::Exam, false)];
        assert!(has_urgent_deadline(&deadlines, today()));
    }

    #[test]
    fn due_in_five_days_is_not_urgent() {
        let deadlines = [due_in(5, DeadlineType::Exam, false)];
        assert!(!has_urgent_deadline(&deadlines, today()));
    }

    #[test]
    fn urgent_window_is_inclusive_on_both_ends() {
        assert!(has_urgent_deadline(&[due_in(0, DeadlineType::Other, false)], today()));
        assert!(has_urgent_deadline(&[due_in(3, DeadlineType::Other, false)], today()));
        assert!(!has_urgent_deadline(&[due_in(4, DeadlineType::Other, false)], today()));
        assert!(!has_urgent_deadline(&[due_in(-1, DeadlineType::Other, false)], today()));
    }

    #[test]
    fn completed_deadlines_are_ignored() {
        let deadlines = [due_in(1, DeadlineType::Assignment, true)];
        assert!(!has_urgent_deadline(&deadlines, today()));
    }

    #[test]
    fn three_open_assignments_is_an_overload() {
        let three = [
            due_in(10, DeadlineType::Assignment, false),
            due_in(11, DeadlineType::Assignment, false),
            due_in(12, DeadlineType::Assignment, false),
        ];
        assert!(has_assignment_overload(&three));
        assert!(!has_assignment_overload(&three[..2]));
    }

    #[test]
    fn overload_ignores_exams_and_completed_work() {
        let deadlines = [
            due_in(10, DeadlineType::Assignment, false),
            due_in(11, DeadlineType::Assignment, false),
            due_in(12, DeadlineType::Assignment, true),
            due_in(13, DeadlineType::Exam, false),
        ];
        assert!(!has_assignment_overload(&deadlines));
    }

    #[test]
    fn type_strings() {
        assert_eq!(
            DeadlineType::from_str_value("assignment").unwrap(),
            DeadlineType::Assignment
        );
        assert!(DeadlineType::from_str_value("quiz").is_err());
    }
}
