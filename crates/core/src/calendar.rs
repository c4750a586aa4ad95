//! Month grids and month navigation for the attendance calendar views.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CoreError::Validation(format!(
                "Invalid month {year}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new`/`of` guarantee the first of the month exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Monday-first weeks covering the month; days outside it are `0`.
    pub fn grid(&self) -> Vec<[u32; 7]> {
        let first = self.first_day();
        let days_in_month = self.last_day().day();
        let offset = first.weekday().num_days_from_monday();

        let mut weeks = Vec::with_capacity(6);
        let mut week = [0u32; 7];
        let mut col = offset as usize;
        for day in 1..=days_in_month {
            week[col] = day;
            col += 1;
            if col == 7 {
                weeks.push(week);
                week = [0; 7];
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }
        weeks
    }
}

/// Everything a month view needs to render its header and navigation.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub weeks: Vec<[u32; 7]>,
    pub previous: YearMonth,
    pub next: YearMonth,
}

impl From<YearMonth> for MonthView {
    fn from(ym: YearMonth) -> Self {
        Self {
            year: ym.year,
            month: ym.month,
            month_name: ym.name(),
            weeks: ym.grid(),
            previous: ym.previous(),
            next: ym.next(),
        }
    }
}
