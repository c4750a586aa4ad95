//! Weekly timetable slots and extra (one-off) classes.
//!
//! Weekdays are numbered Monday = 0 through Sunday = 6. Extra classes are
//! stored with weekday [`EXTRA_CLASS_WEEKDAY`] and a concrete `class_date`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

/// Weekday stored on extra-class rows, which are keyed by date instead.
pub const EXTRA_CLASS_WEEKDAY: i16 = -1;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One timetable row as the scheduling rules see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimetableSlot {
    pub weekday: i16,
    pub is_extra: bool,
    pub class_date: Option<NaiveDate>,
}

impl TimetableSlot {
    /// A recurring slot on `weekday`.
    pub fn regular(weekday: i16) -> Self {
        Self {
            weekday,
            is_extra: false,
            class_date: None,
        }
    }

    /// A one-off class on `date`.
    pub fn extra(date: NaiveDate) -> Self {
        Self {
            weekday: EXTRA_CLASS_WEEKDAY,
            is_extra: true,
            class_date: Some(date),
        }
    }

    /// Whether this is a recurring slot falling on `date`'s weekday.
    pub fn is_regular_on(&self, date: NaiveDate) -> bool {
        !self.is_extra && self.weekday == weekday_index(date)
    }

    /// Whether a class takes place on `date`, counting extra classes.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        if self.is_extra {
            self.class_date == Some(date)
        } else {
            self.is_regular_on(date)
        }
    }
}

/// Monday-based weekday index of `date`.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Display name of a weekday index, if valid.
pub fn weekday_name(weekday: i16) -> Option<&'static str> {
    usize::try_from(weekday)
        .ok()
        .and_then(|i| WEEKDAY_NAMES.get(i).copied())
}

/// Validate a recurring weekday (0..=6).
pub fn validate_weekday(weekday: i16) -> Result<(), CoreError> {
    if !(0..=6).contains(&weekday) {
        return Err(CoreError::Validation(format!(
            "weekday must be between 0 (Monday) and 6 (Sunday), got {weekday}"
        )));
    }
    Ok(())
}

/// Sort and de-duplicate a weekday list after validating each entry.
pub fn normalize_weekdays(weekdays: &[i16]) -> Result<Vec<i16>, CoreError> {
    for day in weekdays {
        validate_weekday(*day)?;
    }
    let mut days = weekdays.to_vec();
    days.sort_unstable();
    days.dedup();
    Ok(days)
}
