//! Eligibility snapshot for qualifying-status holders.
//!
//! Full-rate days are counted inside a rolling window that starts at the
//! later of the qualifying start date and the lookback horizon. Partial credit
//! from the pre-qualifying periods is banked once and is not re-windowed.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, DateRange, EligibilitySnapshot, NormalizedProfile, Severity,
};

use super::absence::total_absence_days;
use super::dates::{add_days, days_between, years_before};
use super::partial_credit::calculate_partial_credit;

/// Rule reference recorded in audit steps for the rolling window.
pub const ROLLING_WINDOW_CLAUSE: &str = "presence.rolling_window";

/// Rule reference recorded in audit steps for the threshold test.
pub const THRESHOLD_CLAUSE: &str = "presence.threshold";

/// Warning code emitted when the qualifying status starts after the
/// reference date.
pub const QUALIFYING_DATE_IN_FUTURE: &str = "QUALIFYING_DATE_IN_FUTURE";

/// The snapshot together with the audit steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct SettledHolderResult {
    /// The computed snapshot.
    pub snapshot: EligibilitySnapshot,
    /// Audit steps in calculation order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about unusual input.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the eligibility snapshot for a qualifying-status holder.
///
/// Returns `Ok(None)` if the profile never held the qualifying status; the
/// caller should use [`super::calculate_projection`] instead.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::calculate_settled_snapshot;
/// use residency_engine::config::ThresholdConfig;
/// use residency_engine::models::{DateRange, NormalizedProfile};
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let profile = NormalizedProfile {
///     qualifying_since: Some(d("2022-01-01")),
///     partial_periods: vec![],
///     absences: vec![DateRange::new(d("2023-06-01"), d("2023-06-15")).unwrap()],
/// };
///
/// let result = calculate_settled_snapshot(&profile, d("2024-01-01"), &ThresholdConfig::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(result.snapshot.total_eligible_days, 717);
/// assert_eq!(result.snapshot.earliest_eligibility_date, d("2025-01-13"));
/// ```
pub fn calculate_settled_snapshot(
    profile: &NormalizedProfile,
    reference_date: NaiveDate,
    thresholds: &ThresholdConfig,
) -> EngineResult<Option<SettledHolderResult>> {
    let Some(qualifying_since) = profile.qualifying_since else {
        return Ok(None);
    };

    let mut audit_steps = Vec::with_capacity(4);
    let mut warnings = Vec::new();

    let horizon = years_before(reference_date, thresholds.lookback_years)?;
    let window_start = qualifying_since.max(horizon);
    let days_under_qualifying_status = days_between(window_start, reference_date).max(0);

    if qualifying_since > reference_date {
        warnings.push(AuditWarning {
            code: QUALIFYING_DATE_IN_FUTURE.to_string(),
            message: format!(
                "Qualifying status starts {} which is after the reference date {}",
                qualifying_since, reference_date
            ),
            severity: Severity::Medium,
        });
    }

    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "qualifying_window".to_string(),
        rule_name: "Qualifying Status Window".to_string(),
        clause_ref: ROLLING_WINDOW_CLAUSE.to_string(),
        input: serde_json::json!({
            "qualifying_since": qualifying_since.to_string(),
            "reference_date": reference_date.to_string(),
            "lookback_years": thresholds.lookback_years
        }),
        output: serde_json::json!({
            "window_start": window_start.to_string(),
            "days_under_qualifying_status": days_under_qualifying_status
        }),
        reasoning: format!(
            "Window starts at the later of {} (qualifying since) and {} ({} years back): {} days held",
            qualifying_since, horizon, thresholds.lookback_years, days_under_qualifying_status
        ),
    });

    let pre_qualifying = pre_qualifying_ranges(profile, qualifying_since, reference_date);
    let partial = calculate_partial_credit(&pre_qualifying, &profile.absences, thresholds, 2);
    audit_steps.push(partial.audit_step);

    let absence = total_absence_days(&profile.absences, window_start, reference_date, 3);
    audit_steps.push(absence.audit_step);

    let total_eligible_days =
        days_under_qualifying_status + partial.net_credit - absence.total_absence_days;
    let days_remaining = (thresholds.threshold_days - total_eligible_days).max(0);
    let earliest_eligibility_date = add_days(reference_date, days_remaining)?;

    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "eligibility_date".to_string(),
        rule_name: "Earliest Eligibility Date".to_string(),
        clause_ref: THRESHOLD_CLAUSE.to_string(),
        input: serde_json::json!({
            "days_under_qualifying_status": days_under_qualifying_status,
            "partial_credit": partial.net_credit,
            "total_absence_days": absence.total_absence_days,
            "threshold_days": thresholds.threshold_days
        }),
        output: serde_json::json!({
            "total_eligible_days": total_eligible_days,
            "days_remaining": days_remaining,
            "earliest_eligibility_date": earliest_eligibility_date.to_string()
        }),
        reasoning: if days_remaining == 0 {
            format!(
                "{} + {} - {} = {} days meets the {} day threshold",
                days_under_qualifying_status,
                partial.net_credit,
                absence.total_absence_days,
                total_eligible_days,
                thresholds.threshold_days
            )
        } else {
            format!(
                "{} + {} - {} = {} days; {} more needed, earliest {}",
                days_under_qualifying_status,
                partial.net_credit,
                absence.total_absence_days,
                total_eligible_days,
                days_remaining,
                earliest_eligibility_date
            )
        },
    });

    debug!(
        reference_date = %reference_date,
        window_start = %window_start,
        total_eligible_days,
        days_remaining,
        "Calculated settled-holder snapshot"
    );

    Ok(Some(SettledHolderResult {
        snapshot: EligibilitySnapshot {
            reference_date,
            qualifying_since,
            window_start,
            days_under_qualifying_status,
            partial_credit: partial.net_credit,
            total_absence_days: absence.total_absence_days,
            total_eligible_days,
            days_remaining,
            earliest_eligibility_date,
            is_eligible: days_remaining == 0,
        },
        audit_steps,
        warnings,
    }))
}

/// Partial periods clamped to end before the qualifying status began and no
/// later than the reference date.
fn pre_qualifying_ranges(
    profile: &NormalizedProfile,
    qualifying_since: NaiveDate,
    reference_date: NaiveDate,
) -> Vec<DateRange> {
    let Some(last_day) = qualifying_since.pred_opt().map(|d| d.min(reference_date)) else {
        return Vec::new();
    };

    profile
        .partial_periods
        .iter()
        .filter_map(|p| p.resolve(reference_date))
        .filter_map(|r| DateRange::new(r.from, r.to.min(last_day)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatePeriod;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(date(from), date(to)).unwrap()
    }

    fn holder(since: &str) -> NormalizedProfile {
        NormalizedProfile {
            qualifying_since: Some(date(since)),
            ..NormalizedProfile::default()
        }
    }

    fn snapshot(profile: &NormalizedProfile, reference: &str) -> EligibilitySnapshot {
        calculate_settled_snapshot(profile, date(reference), &ThresholdConfig::default())
            .unwrap()
            .unwrap()
            .snapshot
    }

    #[test]
    fn test_no_qualifying_status_returns_none() {
        let result = calculate_settled_snapshot(
            &NormalizedProfile::default(),
            date("2024-01-01"),
            &ThresholdConfig::default(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_end_to_end_example() {
        let mut profile = holder("2022-01-01");
        profile.absences = vec![range("2023-06-01", "2023-06-15")];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.window_start, date("2022-01-01"));
        assert_eq!(snapshot.days_under_qualifying_status, 730);
        assert_eq!(snapshot.partial_credit, 0);
        assert_eq!(snapshot.total_absence_days, 13);
        assert_eq!(snapshot.total_eligible_days, 717);
        assert_eq!(snapshot.days_remaining, 378);
        assert_eq!(snapshot.earliest_eligibility_date, date("2025-01-13"));
        assert!(!snapshot.is_eligible);
    }

    #[test]
    fn test_already_eligible() {
        let reference = date("2024-01-01");
        let since = reference - chrono::Duration::days(1200);
        let profile = NormalizedProfile {
            qualifying_since: Some(since),
            ..NormalizedProfile::default()
        };

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.days_under_qualifying_status, 1200);
        assert_eq!(snapshot.days_remaining, 0);
        assert_eq!(snapshot.earliest_eligibility_date, reference);
        assert!(snapshot.is_eligible);
        // Not clamped to the threshold.
        assert_eq!(snapshot.total_eligible_days, 1200);
    }

    #[test]
    fn test_window_limited_by_lookback() {
        let snapshot = snapshot(&holder("2010-01-01"), "2024-01-01");
        assert_eq!(snapshot.window_start, date("2019-01-01"));
        assert_eq!(snapshot.days_under_qualifying_status, 1826);
    }

    #[test]
    fn test_absences_before_window_ignored() {
        let mut profile = holder("2010-01-01");
        profile.absences = vec![range("2015-01-01", "2015-12-31")];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.total_absence_days, 0);
    }

    #[test]
    fn test_partial_credit_from_pre_qualifying_periods() {
        let mut profile = holder("2022-01-01");
        profile.partial_periods = vec![DatePeriod {
            from: date("2021-01-01"),
            to: Some(date("2021-12-31")),
        }];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.partial_credit, 182);
        assert_eq!(snapshot.total_eligible_days, 730 + 182);
        assert_eq!(snapshot.days_remaining, 1095 - 912);
    }

    #[test]
    fn test_partial_credit_not_rewindowed() {
        // Partial period ended well before the lookback horizon but still counts.
        let mut profile = holder("2017-01-01");
        profile.partial_periods = vec![DatePeriod {
            from: date("2016-01-01"),
            to: Some(date("2016-12-31")),
        }];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.window_start, date("2019-01-01"));
        assert_eq!(snapshot.partial_credit, 183);
    }

    #[test]
    fn test_partial_period_clamped_before_qualifying_start() {
        let mut profile = holder("2022-01-01");
        profile.partial_periods = vec![DatePeriod {
            from: date("2021-12-01"),
            to: None,
        }];

        let snapshot = snapshot(&profile, "2024-01-01");
        // Only 2021-12-01..2021-12-31 counts: 31 days -> 15
        assert_eq!(snapshot.partial_credit, 15);
    }

    #[test]
    fn test_partial_period_after_qualifying_start_dropped() {
        let mut profile = holder("2022-01-01");
        profile.partial_periods = vec![DatePeriod {
            from: date("2022-06-01"),
            to: Some(date("2022-12-31")),
        }];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.partial_credit, 0);
    }

    #[test]
    fn test_partial_credit_net_of_absences() {
        let mut profile = holder("2022-01-01");
        profile.partial_periods = vec![DatePeriod {
            from: date("2021-01-01"),
            to: Some(date("2021-12-31")),
        }];
        profile.absences = vec![range("2021-03-01", "2021-03-11")];

        let snapshot = snapshot(&profile, "2024-01-01");
        assert_eq!(snapshot.partial_credit, 178);
        assert_eq!(snapshot.total_absence_days, 0);
    }

    #[test]
    fn test_future_qualifying_date_warns() {
        let result = calculate_settled_snapshot(
            &holder("2025-01-01"),
            date("2024-01-01"),
            &ThresholdConfig::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.snapshot.days_under_qualifying_status, 0);
        assert_eq!(result.snapshot.days_remaining, 1095);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, QUALIFYING_DATE_IN_FUTURE);
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let result = calculate_settled_snapshot(
            &holder("2022-01-01"),
            date("2024-01-01"),
            &ThresholdConfig::default(),
        )
        .unwrap()
        .unwrap();

        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(result.audit_steps[3].rule_id, "eligibility_date");
    }

    #[test]
    fn test_custom_threshold() {
        let thresholds = ThresholdConfig {
            threshold_days: 730,
            ..ThresholdConfig::default()
        };
        let result = calculate_settled_snapshot(&holder("2022-01-01"), date("2024-01-01"), &thresholds)
            .unwrap()
            .unwrap();
        assert!(result.snapshot.is_eligible);
    }
}
