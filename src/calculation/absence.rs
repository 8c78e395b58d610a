//! Absence deduction.
//!
//! The day a person leaves and the day they return both count as days
//! present. An absence from June 1 to June 10 is therefore 8 days absent,
//! not 10. The same rule is applied wherever absences are deducted.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{AuditStep, DateRange};

use super::date_merge::merge_ranges;
use super::dates::days_between;

/// Rule reference recorded in audit steps for absence deduction.
pub const ABSENCE_RULE_CLAUSE: &str = "absence.boundary_days_present";

/// The result of totalling absences in a window.
#[derive(Debug, Clone)]
pub struct AbsenceResult {
    /// Days absent inside the window.
    pub total_absence_days: i64,
    /// Merged absences that intersected the window.
    pub absences_counted: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Days absent for a single (already merged) absence, excluding the departure
/// and return days.
pub(crate) fn absent_days(range: &DateRange) -> i64 {
    (days_between(range.from, range.to) - 1).max(0)
}

/// Totals days absent within `[window_start, window_end]`.
///
/// Absences are filtered to those intersecting the window, merged, and
/// clamped to the window before the boundary-day rule is applied. An empty
/// or inverted window yields zero.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::total_absence_days;
/// use residency_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let absences = vec![DateRange::new(d("2024-06-01"), d("2024-06-10")).unwrap()];
///
/// let result = total_absence_days(&absences, d("2024-01-01"), d("2024-12-31"), 1);
/// assert_eq!(result.total_absence_days, 8);
/// ```
pub fn total_absence_days(
    absences: &[DateRange],
    window_start: NaiveDate,
    window_end: NaiveDate,
    step_number: u32,
) -> AbsenceResult {
    let clamped: Vec<DateRange> = match DateRange::new(window_start, window_end) {
        Some(window) => {
            let in_window: Vec<DateRange> = absences
                .iter()
                .filter(|a| a.overlaps(&window))
                .copied()
                .collect();
            merge_ranges(&in_window)
                .iter()
                .filter_map(|a| a.intersection(&window))
                .collect()
        }
        None => Vec::new(),
    };

    let total: i64 = clamped.iter().map(absent_days).sum();

    debug!(
        window_start = %window_start,
        window_end = %window_end,
        absences_in = absences.len(),
        absences_counted = clamped.len(),
        total_absence_days = total,
        "Totalled absences"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "absence_deduction".to_string(),
        rule_name: "Absence Deduction".to_string(),
        clause_ref: ABSENCE_RULE_CLAUSE.to_string(),
        input: serde_json::json!({
            "window_start": window_start.to_string(),
            "window_end": window_end.to_string(),
            "absences": absences.len()
        }),
        output: serde_json::json!({
            "absences_counted": clamped.len(),
            "total_absence_days": total
        }),
        reasoning: format!(
            "{} merged absence(s) between {} and {}: {} day(s) absent, departure and return days counted as present",
            clamped.len(),
            window_start,
            window_end,
            total
        ),
    };

    AbsenceResult {
        total_absence_days: total,
        absences_counted: clamped.len(),
        audit_step,
    }
}
