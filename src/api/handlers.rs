//! HTTP request handlers for the Workforce Cost Optimization Engine API.
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
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisOptions, run_analysis};
use crate::calculation::validate_records;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{AnalysisResult, AuditWarning};
use crate::optimization::{BatchPolicy, solve_with_policy, summarize};

use super::request::{AnalyzeRequest, ConvertedRecords, OptimizeRequest, resolve_parameters};
use super::response::{ApiError, ApiErrorResponse, OptimizeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/optimize", post(optimize_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
                ApiError::validation_error(body_text)
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

/// Aborts when conversion already rejected records under the abort policy,
/// reporting them together with any validation failures among the rest.
fn abort_on_conversion_rejections(
    converted: &ConvertedRecords,
    policy: BatchPolicy,
) -> Result<(), EngineError> {
    if policy == BatchPolicy::AbortBatch && !converted.rejections.is_empty() {
        let rejections = converted.merge_rejections(validate_records(&converted.records));
        return Err(EngineError::InvalidRecords { rejections });
    }
    Ok(())
}

/// Re-indexes engine rejections in an error to request positions.
fn remap_error(converted: &ConvertedRecords, err: EngineError) -> EngineError {
    match err {
        EngineError::InvalidRecords { rejections } => EngineError::InvalidRecords {
            rejections: converted.merge_rejections(rejections),
        },
        other => other,
    }
}

/// Handler for POST /analyze endpoint.
///
/// Runs the full analysis over the submitted records.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_analysis(request, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                analysis_id = %result.analysis_id,
                days = result.summary.days,
                rejected = result.rejections.len(),
                total_saving = %result.summary.total_saving,
                duration_us = start_time.elapsed().as_micros(),
                "Analysis completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn perform_analysis(
    request: AnalyzeRequest,
    base: &EngineConfig,
) -> Result<AnalysisResult, EngineError> {
    let params = resolve_parameters(request.parameters.as_ref(), base.capacity())?;
    let window = request.resolve_window()?;
    let policy = request.policy;

    let converted = ConvertedRecords::convert(request.records);
    abort_on_conversion_rejections(&converted, policy)?;

    let config = EngineConfig::new(params, *base.analysis());
    let options = AnalysisOptions {
        policy,
        window,
        parallel: false,
    };

    let mut result = run_analysis(&converted.records, &config, &options)
        .map_err(|err| remap_error(&converted, err))?;

    if !converted.rejections.is_empty() {
        let dates: Vec<String> = converted
            .rejections
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        result.audit_trace.warnings.push(AuditWarning {
            code: "RECORDS_SKIPPED".to_string(),
            message: format!(
                "{} record(s) with unrepresentable attendance excluded: {}",
                dates.len(),
                dates.join(", ")
            ),
            severity: "high".to_string(),
        });
    }
    result.rejections = converted.merge_rejections(std::mem::take(&mut result.rejections));

    Ok(result)
}

/// Handler for POST /optimize endpoint.
///
/// Solves the staffing programs only and returns per-day results and totals.
async fn optimize_handler(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing optimization request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_optimization(request, state.config().config()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                days = response.summary.days,
                rejected = response.rejections.len(),
                total_saving = %response.summary.total_saving,
                duration_us = start_time.elapsed().as_micros(),
                "Optimization completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn perform_optimization(
    request: OptimizeRequest,
    base: &EngineConfig,
) -> Result<OptimizeResponse, EngineError> {
    let params = resolve_parameters(request.parameters.as_ref(), base.capacity())?;

    let converted = ConvertedRecords::convert(request.records);
    abort_on_conversion_rejections(&converted, request.policy)?;

    let outcome = solve_with_policy(&converted.records, &params, request.policy)
        .map_err(|err| remap_error(&converted, err))?;

    Ok(OptimizeResponse {
        summary: summarize(&outcome.results)?,
        rejections: converted.merge_rejections(outcome.rejections),
        results: outcome.results,
    })
}
