//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use serde::Deserialize;
use survivor_core::calendar::YearMonth;
use survivor_core::error::CoreError;

/// Month selector (`?year=&month=`) used by the calendar views.
///
/// Missing parts default to the month containing `today`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthParams {
    pub fn resolve(&self, today: NaiveDate) -> Result<YearMonth, CoreError> {
        let current = YearMonth::of(today);
        YearMonth::new(
            self.year.unwrap_or(current.year),
            self.month.unwrap_or(current.month),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn defaults_to_current_month() {
        let ym = MonthParams::default().resolve(today()).unwrap();
        assert_eq!(ym, YearMonth { year: 2026, month: 10 });
    }

    #[test]
    fn partial_selection_keeps_current_year() {
        let params = MonthParams {
            year: None,
            month: Some(2),
        };
        assert_eq!(params.resolve(today()).unwrap().year, 2026);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let params = MonthParams {
            year: Some(2026),
            month: Some(13),
        };
        assert!(params.resolve(today()).is_err());
    }
}
