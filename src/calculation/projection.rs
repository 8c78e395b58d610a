//! Projection for people who do not hold the qualifying status.
//!
//! Answers "if you obtained the qualifying status today, how much partial
//! credit would you bring and when could you first reach the threshold?".

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, DateRange, NormalizedProfile, ProjectionResult, Severity,
};

use super::dates::{add_days, years_before};
use super::partial_credit::calculate_partial_credit;
use super::settled_holder::THRESHOLD_CLAUSE;

/// Warning code emitted when the profile has no partial-countable history.
pub const NO_COUNTABLE_HISTORY: &str = "NO_COUNTABLE_HISTORY";

/// The projection together with the audit steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct ProjectionCalculation {
    /// The computed projection.
    pub projection: ProjectionResult,
    /// Audit steps in calculation order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about unusual input.
    pub warnings: Vec<AuditWarning>,
}

/// Projects partial credit and the earliest eligibility date for a
/// non-holder.
///
/// Partial periods are clamped to the lookback window ending at
/// `reference_date`; an open period ends at `reference_date`. This never
/// returns `None`: with no usable history the projection is zero credit and
/// the full threshold still to serve.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::calculate_projection;
/// use residency_engine::config::ThresholdConfig;
/// use residency_engine::models::NormalizedProfile;
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let result = calculate_projection(
///     &NormalizedProfile::default(),
///     d("2024-01-01"),
///     &ThresholdConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.projection.projected_credit, 0);
/// assert_eq!(result.projection.days_needed_as_qualifying_holder, 1095);
/// assert_eq!(result.projection.projected_earliest_date, d("2026-12-31"));
/// ```
pub fn calculate_projection(
    profile: &NormalizedProfile,
    reference_date: NaiveDate,
    thresholds: &ThresholdConfig,
) -> EngineResult<ProjectionCalculation> {
    let window_start = years_before(reference_date, thresholds.lookback_years)?;
    let mut warnings = Vec::new();

    let countable: Vec<DateRange> = match DateRange::new(window_start, reference_date) {
        Some(window) => profile
            .partial_periods
            .iter()
            .filter_map(|p| p.resolve(reference_date))
            .filter_map(|r| r.intersection(&window))
            .collect(),
        None => Vec::new(),
    };

    if countable.is_empty() {
        warnings.push(AuditWarning {
            code: NO_COUNTABLE_HISTORY.to_string(),
            message: format!(
                "No partial-countable status periods between {} and {}",
                window_start, reference_date
            ),
            severity: Severity::Low,
        });
    }

    let partial = calculate_partial_credit(&countable, &profile.absences, thresholds, 1);
    let projected_credit = partial.net_credit;
    let days_needed = (thresholds.threshold_days - projected_credit).max(0);
    let projected_earliest_date = add_days(reference_date, days_needed)?;

    let final_step = AuditStep {
        step_number: 2,
        rule_id: "projected_eligibility_date".to_string(),
        rule_name: "Projected Eligibility Date".to_string(),
        clause_ref: THRESHOLD_CLAUSE.to_string(),
        input: serde_json::json!({
            "projected_credit": projected_credit,
            "threshold_days": thresholds.threshold_days,
            "reference_date": reference_date.to_string()
        }),
        output: serde_json::json!({
            "days_needed_as_qualifying_holder": days_needed,
            "projected_earliest_date": projected_earliest_date.to_string()
        }),
        reasoning: format!(
            "{} - {} credit = {} days as a qualifying holder, earliest {}",
            thresholds.threshold_days, projected_credit, days_needed, projected_earliest_date
        ),
    };

    debug!(
        reference_date = %reference_date,
        projected_credit,
        days_needed,
        "Calculated projection"
    );

    Ok(ProjectionCalculation {
        projection: ProjectionResult {
            reference_date,
            window_start,
            gross_days: partial.gross_days,
            absence_days_deducted: partial.absence_days_deducted,
            total_countable_days: partial.countable_days,
            projected_credit,
            days_needed_as_qualifying_holder: days_needed,
            projected_earliest_date,
        },
        audit_steps: vec![partial.audit_step, final_step],
        warnings,
    })
}
