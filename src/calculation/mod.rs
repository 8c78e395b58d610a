//! Calculation logic for the Residency Engine.
//!
//! This module contains the presence calculations: date range merging,
//! absence deduction with departure and return days counted as present,
//! capped partial credit, the settled-holder eligibility snapshot, the
//! projection for non-holders, and the recalculation predicate.
//!
//! Every calculation takes the reference date explicitly and never reads the
//! clock.

mod absence;
mod change_detection;
mod date_merge;
mod dates;
mod eligibility;
mod partial_credit;
mod projection;
mod settled_holder;

pub use absence::{ABSENCE_RULE_CLAUSE, AbsenceResult, total_absence_days};
pub use change_detection::should_recalculate;
pub use date_merge::merge_ranges;
pub use dates::{add_days, days_between, years_before};
pub use eligibility::{EligibilityOutcome, evaluate_eligibility};
pub use partial_credit::{PARTIAL_CREDIT_CLAUSE, PartialCreditResult, calculate_partial_credit};
pub use projection::{NO_COUNTABLE_HISTORY, ProjectionCalculation, calculate_projection};
pub use settled_holder::{
    QUALIFYING_DATE_IN_FUTURE, ROLLING_WINDOW_CLAUSE, SettledHolderResult, THRESHOLD_CLAUSE,
    calculate_settled_snapshot,
};
