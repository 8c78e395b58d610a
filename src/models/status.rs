//! Status categories and status-history entries.
//!
//! Every component classifies a status through [`StatusCategory::accrual`],
//! so adding a category forces a decision about how it accrues.

use serde::{Deserialize, Serialize};

/// How days held under a status count toward the presence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accrual {
    /// Full-rate days under the qualifying status.
    Qualifying,
    /// Days that count at the partial-credit rate, subject to the cap.
    Partial,
    /// Days that do not count at all.
    NotCountable,
}

/// The closed set of immigration statuses a person may hold.
///
/// # Example
///
/// ```
/// use residency_engine::models::{Accrual, StatusCategory};
///
/// assert_eq!(StatusCategory::PermanentResident.accrual(), Accrual::Qualifying);
/// assert_eq!(StatusCategory::Student.accrual(), Accrual::Partial);
/// assert_eq!(StatusCategory::RefugeeClaimant.accrual(), Accrual::NotCountable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Permanent resident, the qualifying status.
    PermanentResident,
    /// Temporary resident authorised to work.
    TemporaryWorker,
    /// Temporary resident authorised to study.
    Student,
    /// Temporary resident visitor.
    Visitor,
    /// Person recognised as needing protection.
    ProtectedPerson,
    /// Asylum claim pending; no credit.
    RefugeeClaimant,
    /// In the country without any status; no credit.
    NoStatus,
}

impl StatusCategory {
    /// Classifies this status for presence accrual.
    pub fn accrual(self) -> Accrual {
        match self {
            StatusCategory::PermanentResident => Accrual::Qualifying,
            StatusCategory::TemporaryWorker
            | StatusCategory::Student
            | StatusCategory::Visitor
            | StatusCategory::ProtectedPerson => Accrual::Partial,
            StatusCategory::RefugeeClaimant | StatusCategory::NoStatus => Accrual::NotCountable,
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCategory::PermanentResident => write!(f, "Permanent resident"),
            StatusCategory::TemporaryWorker => write!(f, "Temporary worker"),
            StatusCategory::Student => write!(f, "Student"),
            StatusCategory::Visitor => write!(f, "Visitor"),
            StatusCategory::ProtectedPerson => write!(f, "Protected person"),
            StatusCategory::RefugeeClaimant => write!(f, "Refugee claimant"),
            StatusCategory::NoStatus => write!(f, "No status"),
        }
    }
}

/// A period during which the person held a particular status.
///
/// Dates are kept as received (`YYYY-MM-DD` strings) and validated when the
/// profile is normalised. `to == None` means the period is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// The status held.
    pub status: StatusCategory,
    /// First day held (inclusive).
    pub from: String,
    /// Last day held (inclusive), or absent if still held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_category_qualifies() {
        let all = [
            StatusCategory::PermanentResident,
            StatusCategory::TemporaryWorker,
            StatusCategory::Student,
            StatusCategory::Visitor,
            StatusCategory::ProtectedPerson,
            StatusCategory::RefugeeClaimant,
            StatusCategory::NoStatus,
        ];
        let qualifying: Vec<_> = all.iter().filter(|s| s.accrual() == Accrual::Qualifying).collect();
        assert_eq!(qualifying, vec![&StatusCategory::PermanentResident]);
    }

    #[test]
    fn test_status_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&StatusCategory::PermanentResident).unwrap(),
            "\"permanent_resident\""
        );
        assert_eq!(
            serde_json::to_string(&StatusCategory::ProtectedPerson).unwrap(),
            "\"protected_person\""
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<StatusCategory, _> = serde_json::from_str("\"tourist\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_open_status_entry() {
        let json = r#"{"status": "temporary_worker", "from": "2019-03-01"}"#;
        let entry: StatusEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, StatusCategory::TemporaryWorker);
        assert_eq!(entry.from, "2019-03-01");
        assert_eq!(entry.to, None);
    }

    #[test]
    fn test_display_is_human_readable() {
        assert_eq!(StatusCategory::NoStatus.to_string(), "No status");
    }
}
