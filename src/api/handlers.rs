//! HTTP request handlers for the Residency Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    EligibilityOutcome, ProjectionCalculation, SettledHolderResult, calculate_projection,
    evaluate_eligibility, should_recalculate,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, parse_iso_date};

use super::request::{EligibilityRequest, RecalculationCheckRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationKind, EligibilityResponse, RecalculationCheckResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/eligibility", post(eligibility_handler))
        .route("/projection", post(projection_handler))
        .route("/recalculation-check", post(recalculation_check_handler))
        .with_state(state)
}

/// Handler for POST /eligibility.
///
/// Returns a snapshot for qualifying-status holders and a projection for
/// everyone else.
async fn eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligibility request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let reference_date = match resolve_reference_date(request.reference_date.as_deref()) {
        Ok(date) => date,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let start_time = Instant::now();

    match evaluate_eligibility(&request.profile, reference_date, state.thresholds()) {
        Ok(EligibilityOutcome::Settled(result)) => {
            info!(
                correlation_id = %correlation_id,
                profile_id = %request.profile.id,
                reference_date = %reference_date,
                days_remaining = result.snapshot.days_remaining,
                earliest_eligibility_date = %result.snapshot.earliest_eligibility_date,
                duration_us = start_time.elapsed().as_micros(),
                "Snapshot calculated"
            );
            json_response(StatusCode::OK, snapshot_response(&state, result, start_time))
        }
        Ok(EligibilityOutcome::Projected(result)) => {
            info!(
                correlation_id = %correlation_id,
                profile_id = %request.profile.id,
                reference_date = %reference_date,
                projected_credit = result.projection.projected_credit,
                projected_earliest_date = %result.projection.projected_earliest_date,
                duration_us = start_time.elapsed().as_micros(),
                "Projection calculated"
            );
            json_response(StatusCode::OK, projection_response(&state, result, start_time))
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /projection.
///
/// Always runs the projection, even for qualifying-status holders.
async fn projection_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing projection request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let reference_date = match resolve_reference_date(request.reference_date.as_deref()) {
        Ok(date) => date,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let start_time = Instant::now();

    let result = request
        .profile
        .normalize()
        .and_then(|normalized| calculate_projection(&normalized, reference_date, state.thresholds()));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                profile_id = %request.profile.id,
                projected_credit = result.projection.projected_credit,
                duration_us = start_time.elapsed().as_micros(),
                "Projection calculated"
            );
            json_response(StatusCode::OK, projection_response(&state, result, start_time))
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /recalculation-check.
async fn recalculation_check_handler(
    payload: Result<Json<RecalculationCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let should = match &request.existing_profile {
        Some(existing) => {
            should_recalculate(&request.new_profile, existing, request.is_new_record)
        }
        None => true,
    };

    info!(
        correlation_id = %correlation_id,
        profile_id = %request.new_profile.id,
        should_recalculate = should,
        "Recalculation check"
    );

    json_response(
        StatusCode::OK,
        RecalculationCheckResponse {
            should_recalculate: should,
        },
    )
}

/// Parses the requested reference date, or falls back to today's UTC date.
fn resolve_reference_date(requested: Option<&str>) -> EngineResult<NaiveDate> {
    match requested {
        Some(value) => parse_iso_date(value, "reference_date"),
        None => Ok(Utc::now().date_naive()),
    }
}

fn snapshot_response(
    state: &AppState,
    result: SettledHolderResult,
    start_time: Instant,
) -> EligibilityResponse {
    EligibilityResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rule_code: state.config().rule().code.clone(),
        kind: CalculationKind::Snapshot,
        snapshot: Some(result.snapshot),
        projection: None,
        audit_trace: AuditTrace {
            steps: result.audit_steps,
            warnings: result.warnings,
            duration_us: elapsed_us(start_time),
        },
    }
}

fn projection_response(
    state: &AppState,
    result: ProjectionCalculation,
    start_time: Instant,
) -> EligibilityResponse {
    EligibilityResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rule_code: state.config().rule().code.clone(),
        kind: CalculationKind::Projection,
        snapshot: None,
        projection: Some(result.projection),
        audit_trace: AuditTrace {
            steps: result.audit_steps,
            warnings: result.warnings,
            duration_us: elapsed_us(start_time),
        },
    }
}

fn elapsed_us(start_time: Instant) -> u64 {
    u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
