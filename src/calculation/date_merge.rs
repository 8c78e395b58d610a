//! Date range normalisation.
//!
//! Every day count in the engine runs over merged ranges so a calendar day
//! reported in two overlapping entries is counted once.

use chrono::Days;

use crate::models::DateRange;

/// Merges overlapping and adjacent ranges.
///
/// The result is sorted by `from` and contains no two ranges that overlap or
/// touch (i.e. `next.from > prev.to + 1 day`).
///
/// # Example
///
/// ```
/// use residency_engine::calculation::merge_ranges;
/// use residency_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let ranges = vec![
///     DateRange::new(d("2020-04-01"), d("2020-12-31")).unwrap(),
///     DateRange::new(d("2020-01-01"), d("2020-06-30")).unwrap(),
/// ];
///
/// let merged = merge_ranges(&ranges);
/// assert_eq!(merged, vec![DateRange::new(d("2020-01-01"), d("2020-12-31")).unwrap()]);
/// ```
pub fn merge_ranges(ranges: &[DateRange]) -> Vec<DateRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| (r.from, r.to));

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if touches(last, &range) => {
                last.to = last.to.max(range.to);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Returns true if `next` (which starts no earlier than `last`) overlaps
/// `last` or begins the day after it ends.
fn touches(last: &DateRange, next: &DateRange) -> bool {
    match last.to.checked_add_days(Days::new(1)) {
        Some(day_after) => next.from <= day_after,
        // `last` ends on the final representable day, so nothing starts after it.
        None => true,
    }
}
