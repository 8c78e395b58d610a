//! Calendar date ranges and ISO date parsing.
//!
//! Profile records carry dates as `YYYY-MM-DD` strings. This module turns them
//! into validated [`DateRange`] and [`DatePeriod`] values, reporting the
//! offending field path when a value is malformed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// `field` names the value in error messages (e.g. `absences[0].from`).
///
/// # Example
///
/// ```
/// use residency_engine::models::parse_iso_date;
/// use chrono::NaiveDate;
///
/// let date = parse_iso_date("2024-06-01", "from").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
///
/// assert!(parse_iso_date("2024-6-1", "from").is_err());
/// assert!(parse_iso_date("2024-02-30", "from").is_err());
/// ```
pub fn parse_iso_date(value: &str, field: &str) -> EngineResult<NaiveDate> {
    // chrono accepts unpadded and signed components; the wire format does not.
    let well_formed = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !well_formed {
        return Err(EngineError::validation(
            field,
            format!("'{}' is not a YYYY-MM-DD date", value),
        ));
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|e| {
        EngineError::validation(field, format!("'{}' is not a valid date: {}", value, e))
    })
}

/// An inclusive range of calendar days with `from <= to`.
///
/// # Example
///
/// ```
/// use residency_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.inclusive_days(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

/// Unchecked wire form of a [`DateRange`].
#[derive(Deserialize)]
struct RangeBounds {
    from: NaiveDate,
    to: NaiveDate,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = String;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        DateRange::new(bounds.from, bounds.to).ok_or_else(|| {
            format!(
                "range ends ({}) before it starts ({})",
                bounds.to, bounds.from
            )
        })
    }
}

impl DateRange {
    /// Creates a range, returning `None` when `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    /// Parses both endpoints and checks ordering.
    ///
    /// `field` is the path prefix used in error messages; `.from` and `.to`
    /// are appended for the individual endpoints.
    pub fn parse(from: &str, to: &str, field: &str) -> EngineResult<Self> {
        let from_date = parse_iso_date(from, &format!("{}.from", field))?;
        let to_date = parse_iso_date(to, &format!("{}.to", field))?;

        Self::new(from_date, to_date).ok_or_else(|| {
            EngineError::validation(
                field,
                format!("range ends ({}) before it starts ({})", to_date, from_date),
            )
        })
    }

    /// Number of calendar days in the range, counting both endpoints.
    pub fn inclusive_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Returns true if the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Returns the shared part of two ranges, if any.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        DateRange::new(self.from.max(other.from), self.to.min(other.to))
    }
}

/// A status period whose end may still be open.
///
/// An open period (`to == None`) runs through whatever reference date the
/// calculation is made for; [`DatePeriod::resolve`] closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    /// First day of the period (inclusive).
    pub from: NaiveDate,
    /// Last day of the period (inclusive), or `None` if ongoing.
    pub to: Option<NaiveDate>,
}

impl DatePeriod {
    /// Closes an open period at `reference_date` and returns the resulting
    /// range, or `None` if the period starts after it ends.
    pub fn resolve(&self, reference_date: NaiveDate) -> Option<DateRange> {
        DateRange::new(self.from, self.to.unwrap_or(reference_date))
    }
}
