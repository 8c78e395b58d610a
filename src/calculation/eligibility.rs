//! Entry point that picks the right calculator for a profile.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::EngineResult;
use crate::models::ProfileRecord;

use super::projection::{ProjectionCalculation, calculate_projection};
use super::settled_holder::{SettledHolderResult, calculate_settled_snapshot};

/// The outcome of evaluating a profile.
#[derive(Debug, Clone)]
pub enum EligibilityOutcome {
    /// The profile holds (or held) the qualifying status.
    Settled(SettledHolderResult),
    /// The profile has never held the qualifying status.
    Projected(ProjectionCalculation),
}

/// Normalises the profile once and runs the settled-holder calculation, or
/// the projection if the profile has no qualifying start date.
///
/// # Errors
///
/// Returns a validation error if the profile contains a malformed date or an
/// inverted range.
///
/// # Example
///
/// ```
/// use residency_engine::calculation::{EligibilityOutcome, evaluate_eligibility};
/// use residency_engine::config::ThresholdConfig;
/// use residency_engine::models::ProfileRecord;
/// use chrono::NaiveDate;
///
/// let profile = ProfileRecord {
///     qualifying_since: Some("2022-01-01".to_string()),
///     ..ProfileRecord::default()
/// };
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// match evaluate_eligibility(&profile, reference, &ThresholdConfig::default()).unwrap() {
///     EligibilityOutcome::Settled(result) => assert_eq!(result.snapshot.days_remaining, 365),
///     EligibilityOutcome::Projected(_) => panic!("expected a snapshot"),
/// }
/// ```
pub fn evaluate_eligibility(
    profile: &ProfileRecord,
    reference_date: NaiveDate,
    thresholds: &ThresholdConfig,
) -> EngineResult<EligibilityOutcome> {
    let normalized = profile.normalize()?;

    if let Some(settled) = calculate_settled_snapshot(&normalized, reference_date, thresholds)? {
        return Ok(EligibilityOutcome::Settled(settled));
    }

    debug!(profile_id = %profile.id, "No qualifying status, projecting instead");
    calculate_projection(&normalized, reference_date, thresholds).map(EligibilityOutcome::Projected)
}
