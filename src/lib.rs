//! Physical-presence Residency Engine
//!
//! This crate calculates progress toward a physical-presence threshold
//! (e.g. 1095 days within 5 years) from a profile's status history and
//! absences: an eligibility snapshot for qualifying-status holders, and a
//! projection for everyone else.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
