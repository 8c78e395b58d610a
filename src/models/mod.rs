//! Core data models for the Residency Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod audit;
mod date_range;
mod eligibility;
mod profile;
mod status;

pub use absence::AbsenceEntry;
pub use audit::{AuditStep, AuditTrace, AuditWarning, Severity};
pub use date_range::{DatePeriod, DateRange, parse_iso_date};
pub use eligibility::{EligibilitySnapshot, ProjectionResult};
pub use profile::{LegacyPeriod, NormalizedProfile, ProfileRecord};
pub use status::{Accrual, StatusCategory, StatusEntry};
