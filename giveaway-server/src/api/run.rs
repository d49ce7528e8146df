//! Run API Handlers
//!
//! HTTP endpoints for starting scrapes and checking their status.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use giveaway_core::dto::run::{RunStatusResponse, StartRunRequest, StartRunResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::run_service::{self, RunError};

/// POST /start (alias POST /run)
/// Start the comment scraper for one post
pub async fn start_run(
    State(state): State<AppState>,
    payload: Result<Json<StartRunRequest>, JsonRejection>,
) -> ApiResult<Json<StartRunResponse>> {
    let Json(req) = payload?;
    tracing::info!("Starting scrape");

    let run = run_service::start_run(
        &state.client,
        &state.config.actor_id,
        state.config.limit_policy(),
        req,
    )
    .await
    .map_err(|e| match e {
        RunError::ValidationError(msg) => ApiError::BadRequest(msg),
        RunError::ClientError(err) => ApiError::upstream("Failed to start actor", err),
    })?;

    Ok(Json(StartRunResponse {
        success: true,
        run_id: run.id,
    }))
}

/// GET /status/{run_id}
/// Single status snapshot of a run, without waiting
pub async fn get_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<RunStatusResponse>> {
    tracing::debug!("Getting status of run: {}", run_id);

    let run = run_service::get_status(&state.client, &run_id)
        .await
        .map_err(|e| match e {
            RunError::ValidationError(msg) => ApiError::BadRequest(msg),
            RunError::ClientError(err) => ApiError::upstream("Failed to get actor status", err),
        })?;

    let dataset_id = run.dataset_id().map(str::to_string);

    Ok(Json(RunStatusResponse {
        success: true,
        status: run.status,
        dataset_id,
    }))
}
