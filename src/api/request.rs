//! Request types for the Residency Engine API.

use serde::{Deserialize, Serialize};

use crate::models::ProfileRecord;

/// Request body for the `/eligibility` and `/projection` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The profile to evaluate.
    pub profile: ProfileRecord,
    /// The date to calculate for (`YYYY-MM-DD`). Defaults to today (UTC)
    /// when omitted. Parsed as strictly as the profile dates.
    #[serde(default)]
    pub reference_date: Option<String>,
}

/// Request body for the `/recalculation-check` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationCheckRequest {
    /// The profile as it will be written.
    pub new_profile: ProfileRecord,
    /// The profile as currently stored, if any.
    #[serde(default)]
    pub existing_profile: Option<ProfileRecord>,
    /// Whether the write creates the record.
    #[serde(default)]
    pub is_new_record: bool,
}
