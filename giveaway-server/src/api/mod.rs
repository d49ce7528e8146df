//! API Module
//!
//! HTTP API layer of the relay.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod run;
pub mod winners;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use giveaway_client::ApifyClient;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::service::resolver::RunResolver;

/// Shared handler state
///
/// Everything here is immutable after startup; requests never coordinate
/// through it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: ApifyClient,
    pub resolver: Arc<RunResolver<ApifyClient>>,
}

impl AppState {
    pub fn new(config: Config, client: ApifyClient) -> Self {
        let resolver = RunResolver::with_backoff(
            client.clone(),
            config.backoff_policy(),
            config.resolver_options(),
        );

        Self {
            config: Arc::new(config),
            client,
            resolver: Arc::new(resolver),
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/debug/apify", get(health::debug_apify))
        // Run endpoints
        .route("/start", post(run::start_run))
        .route("/run", post(run::start_run))
        .route("/status/{run_id}", get(run::get_status))
        // Result endpoints
        .route("/winners/{run_id}", get(winners::get_winners))
        .route(
            "/datasets/{dataset_id}/items",
            get(winners::get_dataset_items),
        )
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
