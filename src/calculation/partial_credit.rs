//! Partial-credit accrual.
//!
//! Days held under a partial-countable status (e.g. as a student or worker
//! before becoming a permanent resident) count at a reduced rate, up to a cap.
//! Absences during those periods are subtracted first; the rate and the cap
//! are applied to what remains.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::models::{AuditStep, DateRange};

use super::absence::absent_days;
use super::date_merge::merge_ranges;

/// Rule reference recorded in audit steps for partial credit.
pub const PARTIAL_CREDIT_CLAUSE: &str = "partial_credit.capped_half_rate";

/// The result of a partial-credit calculation.
#[derive(Debug, Clone)]
pub struct PartialCreditResult {
    /// Days covered by the merged countable ranges, both endpoints included.
    pub gross_days: i64,
    /// Absence days falling inside the countable ranges.
    pub absence_days_deducted: i64,
    /// `gross_days - absence_days_deducted`, floored at zero.
    pub countable_days: i64,
    /// Credit after the rate and cap.
    pub net_credit: i64,
    /// Whether the cap reduced the credit.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes capped partial credit for a set of countable ranges.
///
/// 1. Countable ranges are merged so overlapping periods count once.
/// 2. `gross_days` sums each merged range's inclusive day count.
/// 3. Absences are merged, then each absence's overlap with each range is
///    deducted using the boundary-day rule.
/// 4. `net_credit = min(floor(countable_days × rate), cap)`.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::calculate_partial_credit;
/// use residency_engine::config::ThresholdConfig;
/// use residency_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let ranges = vec![DateRange::new(d("2020-01-01"), d("2020-12-31")).unwrap()];
///
/// let result = calculate_partial_credit(&ranges, &[], &ThresholdConfig::default(), 1);
/// assert_eq!(result.gross_days, 366);
/// assert_eq!(result.net_credit, 183);
/// assert!(!result.cap_applied);
/// ```
pub fn calculate_partial_credit(
    countable_ranges: &[DateRange],
    absences: &[DateRange],
    thresholds: &ThresholdConfig,
    step_number: u32,
) -> PartialCreditResult {
    let merged = merge_ranges(countable_ranges);
    let merged_absences = merge_ranges(absences);

    let gross_days: i64 = merged.iter().map(DateRange::inclusive_days).sum();

    let absence_days_deducted: i64 = merged_absences
        .iter()
        .flat_map(|absence| merged.iter().filter_map(|r| absence.intersection(r)))
        .map(|overlap| absent_days(&overlap))
        .sum();

    let countable_days = (gross_days - absence_days_deducted).max(0);

    let uncapped = (Decimal::from(countable_days) * thresholds.partial_credit_rate)
        .floor()
        .to_i64()
        .unwrap_or(i64::MAX);
    let cap_applied = uncapped > thresholds.max_partial_credit_days;
    let net_credit = uncapped.min(thresholds.max_partial_credit_days).max(0);

    debug!(
        ranges = merged.len(),
        gross_days,
        absence_days_deducted,
        net_credit,
        cap_applied,
        "Calculated partial credit"
    );

    let reasoning = if cap_applied {
        format!(
            "({} gross - {} absent) × {} = {} days (capped at {})",
            gross_days,
            absence_days_deducted,
            thresholds.partial_credit_rate.normalize(),
            net_credit,
            thresholds.max_partial_credit_days
        )
    } else {
        format!(
            "({} gross - {} absent) × {} = {} days",
            gross_days,
            absence_days_deducted,
            thresholds.partial_credit_rate.normalize(),
            net_credit
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "partial_credit".to_string(),
        rule_name: "Partial Credit".to_string(),
        clause_ref: PARTIAL_CREDIT_CLAUSE.to_string(),
        input: serde_json::json!({
            "countable_ranges": countable_ranges.len(),
            "merged_ranges": merged.len(),
            "absences": absences.len(),
            "rate": thresholds.partial_credit_rate.normalize().to_string(),
            "cap": thresholds.max_partial_credit_days
        }),
        output: serde_json::json!({
            "gross_days": gross_days,
            "absence_days_deducted": absence_days_deducted,
            "countable_days": countable_days,
            "net_credit": net_credit,
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    PartialCreditResult {
        gross_days,
        absence_days_deducted,
        countable_days,
        net_credit,
        cap_applied,
        audit_step,
    }
}
