//! HTTP API module for the Residency Engine.
//!
//! This module provides the REST API endpoints for eligibility snapshots,
//! projections, and recalculation checks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EligibilityRequest, RecalculationCheckRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationKind, EligibilityResponse, RecalculationCheckResponse,
};
pub use state::AppState;
