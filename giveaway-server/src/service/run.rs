//! Run Service
//!
//! Starting actor runs and reading single status snapshots.

use giveaway_client::{ApifyClient, ClientError};
use giveaway_core::domain::run::Run;
use giveaway_core::dto::run::{ActorInput, ResultsLimit, StartRunRequest};

/// Service error type
#[derive(Debug)]
pub enum RunError {
    ValidationError(String),
    ClientError(ClientError),
}

impl From<ClientError> for RunError {
    fn from(err: ClientError) -> Self {
        RunError::ClientError(err)
    }
}

pub type Result<T> = std::result::Result<T, RunError>;

/// Bounds applied to the requested comment count
#[derive(Debug, Clone, Copy)]
pub struct LimitPolicy {
    pub default: u32,
    pub max: u32,
}

/// Start a comment scrape for one post
///
/// Validates the request before any remote call is made.
pub async fn start_run(
    client: &ApifyClient,
    actor_id: &str,
    limits: LimitPolicy,
    req: StartRunRequest,
) -> Result<Run> {
    let (url, results_limit) = validate_start_request(&req, limits)?;

    if !client.has_token() {
        return Err(RunError::ClientError(ClientError::MissingToken));
    }

    let input = ActorInput::for_post(url, results_limit);
    let run = client.start_run(actor_id, &input).await?;

    if run.id.trim().is_empty() {
        return Err(RunError::ClientError(ClientError::UnexpectedPayload(
            "run created without an id".to_string(),
        )));
    }

    tracing::info!(
        run_id = %run.id,
        results_limit,
        "Started scrape for {}",
        url
    );

    Ok(run)
}

/// Get a single snapshot of a run, without waiting
pub async fn get_status(client: &ApifyClient, run_id: &str) -> Result<Run> {
    if run_id.trim().is_empty() {
        return Err(RunError::ValidationError(
            "Run ID cannot be empty".to_string(),
        ));
    }

    let run = client.get_run(run_id).await?;
    tracing::debug!(run_id, status = %run.status, "Fetched run status");

    Ok(run)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_start_request(req: &StartRunRequest, limits: LimitPolicy) -> Result<(&str, u32)> {
    let url = req
        .post_url()
        .ok_or_else(|| RunError::ValidationError("Missing Instagram post URL".to_string()))?;

    let limit = req
        .results_limit(limits.default, limits.max)
        .map_err(RunError::ValidationError)?;

    if let ResultsLimit::Clamped { requested, applied } = limit {
        tracing::warn!(
            requested,
            applied,
            "Requested result count above the maximum, lowering it"
        );
    }

    Ok((url, limit.value()))
}
