//! Profile records and their normalisation.
//!
//! A profile may describe status history in two shapes:
//!
//! - the preferred `status_history` list of [`StatusEntry`] values, or
//! - the legacy pair of a single `qualifying_since` date plus a list of
//!   `pre_qualifying_periods`.
//!
//! [`ProfileRecord::normalize`] converts either shape into a
//! [`NormalizedProfile`] once, at the entry point, so the calculators never
//! branch on the input shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::absence::AbsenceEntry;
use super::date_range::{DatePeriod, DateRange, parse_iso_date};
use super::status::{Accrual, StatusEntry};

/// A pre-qualifying period in the legacy profile shape.
///
/// Every legacy period counts at the partial-credit rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPeriod {
    /// First day of the period (`YYYY-MM-DD`).
    pub from: String,
    /// Last day of the period (`YYYY-MM-DD`).
    pub to: String,
}

/// The profile record owned by the caller.
///
/// Only the date-bearing fields feed the calculators. The record is borrowed
/// and never mutated.
///
/// # Example
///
/// ```
/// use residency_engine::models::ProfileRecord;
///
/// let json = r#"{
///     "id": "user_001",
///     "status_history": [
///         {"status": "student", "from": "2018-09-01", "to": "2021-12-31"},
///         {"status": "permanent_resident", "from": "2022-01-01"}
///     ],
///     "absences": [{"from": "2023-06-01", "to": "2023-06-15", "place": "Lisbon"}]
/// }"#;
///
/// let profile: ProfileRecord = serde_json::from_str(json).unwrap();
/// let normalized = profile.normalize().unwrap();
/// assert!(normalized.qualifying_since.is_some());
/// assert_eq!(normalized.partial_periods.len(), 1);
/// assert_eq!(normalized.absences.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Identifier of the profile in the caller's store.
    #[serde(default)]
    pub id: String,
    /// Display name. Not used in any calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Status periods (preferred shape).
    #[serde(default)]
    pub status_history: Vec<StatusEntry>,
    /// Date the qualifying status was obtained (legacy shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifying_since: Option<String>,
    /// Partial-countable periods before the qualifying status (legacy shape).
    #[serde(default)]
    pub pre_qualifying_periods: Vec<LegacyPeriod>,
    /// Periods spent outside the country.
    #[serde(default)]
    pub absences: Vec<AbsenceEntry>,
}

/// A profile reduced to what the calculators consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedProfile {
    /// First day of the qualifying status, if it was ever held.
    pub qualifying_since: Option<NaiveDate>,
    /// Periods held under a partial-countable status.
    pub partial_periods: Vec<DatePeriod>,
    /// Validated absences, in input order.
    pub absences: Vec<DateRange>,
}

impl ProfileRecord {
    /// Validates the record and converts it to a [`NormalizedProfile`].
    ///
    /// If `status_history` is non-empty it is authoritative and the legacy
    /// fields are ignored. Otherwise the legacy fields are used.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ValidationError`] naming the offending field if
    /// any date is malformed, any range ends before it starts, or more than
    /// one status entry is open-ended.
    pub fn normalize(&self) -> EngineResult<NormalizedProfile> {
        let absences = self
            .absences
            .iter()
            .enumerate()
            .map(|(i, a)| DateRange::parse(&a.from, &a.to, &format!("absences[{}]", i)))
            .collect::<EngineResult<Vec<_>>>()?;

        let (qualifying_since, partial_periods) = if self.status_history.is_empty() {
            self.normalize_legacy()?
        } else {
            self.normalize_history()?
        };

        debug!(
            profile_id = %self.id,
            legacy_shape = self.status_history.is_empty(),
            has_qualifying_status = qualifying_since.is_some(),
            partial_periods = partial_periods.len(),
            absences = absences.len(),
            "Normalized profile"
        );

        Ok(NormalizedProfile {
            qualifying_since,
            partial_periods,
            absences,
        })
    }

    fn normalize_history(&self) -> EngineResult<(Option<NaiveDate>, Vec<DatePeriod>)> {
        let mut qualifying_since: Option<NaiveDate> = None;
        let mut partial_periods = Vec::new();
        let mut open_entry: Option<usize> = None;

        for (i, entry) in self.status_history.iter().enumerate() {
            let field = format!("status_history[{}]", i);
            let from = parse_iso_date(&entry.from, &format!("{}.from", field))?;
            let to = match &entry.to {
                Some(to) => {
                    let to = parse_iso_date(to, &format!("{}.to", field))?;
                    if to < from {
                        return Err(EngineError::validation(
                            field,
                            format!("range ends ({}) before it starts ({})", to, from),
                        ));
                    }
                    Some(to)
                }
                None => {
                    if let Some(previous) = open_entry {
                        return Err(EngineError::validation(
                            "status_history",
                            format!(
                                "entries {} and {} are both open-ended; at most one may omit 'to'",
                                previous, i
                            ),
                        ));
                    }
                    open_entry = Some(i);
                    None
                }
            };

            match entry.status.accrual() {
                Accrual::Qualifying => {
                    qualifying_since = Some(qualifying_since.map_or(from, |d| d.min(from)));
                }
                Accrual::Partial => partial_periods.push(DatePeriod { from, to }),
                Accrual::NotCountable => {}
            }
        }

        Ok((qualifying_since, partial_periods))
    }

    fn normalize_legacy(&self) -> EngineResult<(Option<NaiveDate>, Vec<DatePeriod>)> {
        let qualifying_since = self
            .qualifying_since
            .as_deref()
            .map(|s| parse_iso_date(s, "qualifying_since"))
            .transpose()?;

        let partial_periods = self
            .pre_qualifying_periods
            .iter()
            .enumerate()
            .map(|(i, p)| {
                DateRange::parse(&p.from, &p.to, &format!("pre_qualifying_periods[{}]", i)).map(
                    |range| DatePeriod {
                        from: range.from,
                        to: Some(range.to),
                    },
                )
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok((qualifying_since, partial_periods))
    }
}
