//! Calendar-day arithmetic shared by the accountants.

use chrono::{Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Whole days from `from` to `to` (`to - from`); negative if `to` is earlier.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::days_between;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(days_between(from, to), 9);
/// assert_eq!(days_between(to, from), -9);
/// ```
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Adds a non-negative number of days to `date`.
pub fn add_days(date: NaiveDate, days: i64) -> EngineResult<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|d| date.checked_add_days(Days::new(d)))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("cannot add {} days to {}", days, date),
        })
}

/// The same calendar day `years` years earlier.
///
/// February 29 maps to February 28 in a non-leap target year.
pub fn years_before(date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_sub_months(Months::new(months)))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("cannot go back {} years from {}", years, date),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_days_between_across_leap_year() {
        assert_eq!(days_between(date("2024-01-01"), date("2025-01-01")), 366);
        assert_eq!(days_between(date("2022-01-01"), date("2024-01-01")), 730);
    }

    #[test]
    fn test_days_between_same_day_is_zero() {
        assert_eq!(days_between(date("2024-01-01"), date("2024-01-01")), 0);
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date("2024-01-01"), 378).unwrap(), date("2025-01-13"));
        assert_eq!(add_days(date("2024-01-01"), 0).unwrap(), date("2024-01-01"));
    }

    #[test]
    fn test_add_negative_days_is_error() {
        assert!(matches!(
            add_days(date("2024-01-01"), -1),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_add_days_overflow_is_error() {
        assert!(add_days(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_years_before() {
        assert_eq!(years_before(date("2024-01-01"), 5).unwrap(), date("2019-01-01"));
    }

    #[test]
    fn test_years_before_leap_day() {
        assert_eq!(years_before(date("2024-02-29"), 5).unwrap(), date("2019-02-28"));
    }
}
