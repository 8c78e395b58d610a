//! Absence model.

use serde::{Deserialize, Serialize};

/// A period spent outside the country.
///
/// The departure day (`from`) and return day (`to`) both count as days
/// present; only the days strictly between them are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceEntry {
    /// Departure date (`YYYY-MM-DD`).
    pub from: String,
    /// Return date (`YYYY-MM-DD`).
    pub to: String,
    /// Destination. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}
