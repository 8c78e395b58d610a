//! Recalculation predicate.

use crate::models::ProfileRecord;

/// Returns true if a profile write should trigger a recalculation.
///
/// New records always recalculate. Otherwise only the date-bearing fields
/// are compared: the status history, the legacy qualifying date and
/// pre-qualifying periods, and the absence list. This is advisory; calling
/// the calculators on every write gives the same results.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::should_recalculate;
/// use residency_engine::models::ProfileRecord;
///
/// let existing = ProfileRecord::default();
/// let mut renamed = existing.clone();
/// renamed.display_name = Some("Sam".to_string());
///
/// assert!(!should_recalculate(&renamed, &existing, false));
/// assert!(should_recalculate(&renamed, &existing, true));
/// ```
pub fn should_recalculate(
    new_data: &ProfileRecord,
    existing_data: &ProfileRecord,
    is_new_record: bool,
) -> bool {
    is_new_record
        || new_data.status_history != existing_data.status_history
        || new_data.qualifying_since != existing_data.qualifying_since
        || new_data.pre_qualifying_periods != existing_data.pre_qualifying_periods
        || new_data.absences != existing_data.absences
}
