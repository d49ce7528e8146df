//! Winners API Handlers
//!
//! HTTP endpoints returning scraped comments.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use giveaway_core::dto::dataset::{DatasetItemsResponse, ItemsQuery};
use giveaway_core::dto::run::WinnersResponse;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /winners/{run_id}
/// Wait for the run to finish, then return its comments
pub async fn get_winners(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
    query: Result<Query<ItemsQuery>, QueryRejection>,
) -> ApiResult<Json<WinnersResponse>> {
    let Query(query) = query?;
    tracing::info!("Resolving winners for run: {}", run_id);

    let resolved = state
        .resolver
        .resolve_limited(&run_id, query.limit())
        .await?;

    Ok(Json(WinnersResponse {
        success: true,
        run_id: resolved.run_id,
        dataset_id: resolved.dataset_id,
        items: resolved.items,
    }))
}

/// GET /datasets/{dataset_id}/items
/// Return the items of a known dataset in a single fetch
pub async fn get_dataset_items(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
    query: Result<Query<ItemsQuery>, QueryRejection>,
) -> ApiResult<Json<DatasetItemsResponse>> {
    let Query(query) = query?;
    tracing::debug!("Fetching items of dataset: {}", dataset_id);

    let items = state
        .client
        .list_dataset_items(&dataset_id, query.limit())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch dataset items", e))?;

    Ok(Json(DatasetItemsResponse {
        success: true,
        items,
    }))
}
