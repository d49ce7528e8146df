//! Giveaway Relay
//!
//! HTTP relay between a giveaway front-end and the Apify Instagram comment
//! scraper: starts scrape runs, reports their status and returns the scraped
//! comments once a run has finished.

use anyhow::{Context, Result};
use giveaway_client::ApifyClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod service;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "giveaway_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Giveaway Relay...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Loaded configuration: apify_base_url={}, actor_id={}, max_status_attempts={}, poll_interval={:?}",
        config.apify_base_url,
        config.actor_id,
        config.max_status_attempts,
        config.poll_interval
    );

    if config.apify_token.is_none() {
        tracing::warn!("No Apify token configured; runs cannot be started until APIFY_API_TOKEN is set");
    }

    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let mut client = ApifyClient::with_client(config.apify_base_url.clone(), http_client);
    if let Some(token) = &config.apify_token {
        client = client.with_token(token.clone());
    }

    let addr = config.bind_addr.clone();

    // Build router with all API endpoints
    let app = api::create_router(api::AppState::new(config, client));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
