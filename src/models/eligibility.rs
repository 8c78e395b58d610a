//! Calculation outputs.
//!
//! [`EligibilitySnapshot`] describes a qualifying-status holder;
//! [`ProjectionResult`] is the "what if you obtained it today" estimate for
//! everyone else. Both are computed fresh on every call and owned by the
//! caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Eligibility snapshot for a person who holds (or held) the qualifying
/// status.
///
/// `total_eligible_days` is not clamped to the threshold, so callers can show
/// how far past it a person is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilitySnapshot {
    /// The date the snapshot was computed for.
    pub reference_date: NaiveDate,
    /// First day of the qualifying status.
    pub qualifying_since: NaiveDate,
    /// Start of the rolling window: the later of `qualifying_since` and the
    /// lookback horizon.
    pub window_start: NaiveDate,
    /// Days in the window under the qualifying status, before absences.
    pub days_under_qualifying_status: i64,
    /// Capped partial credit from pre-qualifying periods, net of absences.
    pub partial_credit: i64,
    /// Absence days inside the window.
    pub total_absence_days: i64,
    /// `days_under_qualifying_status + partial_credit - total_absence_days`.
    pub total_eligible_days: i64,
    /// Days still needed to reach the threshold, floored at zero.
    pub days_remaining: i64,
    /// Earliest date the threshold is met if no further absences occur.
    pub earliest_eligibility_date: NaiveDate,
    /// True when `days_remaining` is zero.
    pub is_eligible: bool,
}

/// Projection for a person who does not hold the qualifying status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// The date the projection was computed for.
    pub reference_date: NaiveDate,
    /// Start of the lookback window partial periods were clamped to.
    pub window_start: NaiveDate,
    /// Days held under partial-countable statuses inside the window.
    pub gross_days: i64,
    /// Absence days that fell within those periods.
    pub absence_days_deducted: i64,
    /// `gross_days - absence_days_deducted`, floored at zero.
    pub total_countable_days: i64,
    /// Capped partial credit if the qualifying status were obtained today.
    pub projected_credit: i64,
    /// Full-rate days still needed after the projected credit.
    pub days_needed_as_qualifying_holder: i64,
    /// `reference_date + days_needed_as_qualifying_holder`.
    pub projected_earliest_date: NaiveDate,
}
