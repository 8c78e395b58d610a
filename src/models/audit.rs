//! Audit trail models.
//!
//! Every calculator appends one [`AuditStep`] per rule it applies, so a
//! snapshot or projection can be explained day count by day count.

use serde::{Deserialize, Serialize};

/// One rule application: what went in, what came out, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Position of the step within its calculation, starting at 1.
    pub step_number: u32,
    /// Stable identifier such as `absence_deduction`.
    pub rule_id: String,
    /// Display name of the rule.
    pub rule_name: String,
    /// Which part of the presence rule this step applies.
    pub clause_ref: String,
    /// Day counts and dates the step consumed.
    pub input: serde_json::Value,
    /// Day counts and dates the step produced.
    pub output: serde_json::Value,
    /// The arithmetic, spelled out.
    pub reasoning: String,
}

/// How much attention a warning deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// The result is valid but probably not what the caller expected.
    Medium,
}

/// Unusual input that still produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Machine-readable code, e.g. `NO_COUNTABLE_HISTORY`.
    pub code: String,
    /// Explanation naming the dates involved.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

/// Steps and warnings for one calculation, plus its wall-clock cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Steps in the order they ran.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
}
