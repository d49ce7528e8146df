//! Run resolver
//!
//! Waits for a remote actor run to finish and returns the items of the dataset
//! it produced. Resolution is read-only against the platform, so a failed call
//! can simply be repeated with the same run id.

use std::sync::Arc;
use std::time::Duration;

use giveaway_client::{ClientError, RemoteJobApi};
use giveaway_core::domain::item::ResultItem;
use giveaway_core::domain::run::{Run, RunStatus};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::service::backoff::BackoffPolicy;

pub type Result<T> = std::result::Result<T, ResolutionError>;

/// Why a run could not be resolved into items
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Run ID cannot be empty")]
    InvalidRunId,

    /// The run reached a terminal non-success state
    #[error("Run finished with status {status}")]
    RunFailed { status: RunStatus },

    #[error("Run still pending after {attempts} status check(s)")]
    PollingTimedOut { attempts: u32 },

    /// The run succeeded but its dataset id never appeared
    #[error("Run {run_id} succeeded but its dataset is not available yet")]
    ResultSetNotReady { run_id: String },

    #[error("Failed to fetch dataset items: {detail}")]
    ResultFetchFailed { detail: String },

    #[error("Remote job API request failed: {0}")]
    Transport(#[from] ClientError),
}

impl ResolutionError {
    /// Whether calling `resolve` again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ResolutionError::InvalidRunId | ResolutionError::RunFailed { .. } => false,
            ResolutionError::PollingTimedOut { .. }
            | ResolutionError::ResultSetNotReady { .. }
            | ResolutionError::ResultFetchFailed { .. } => true,
            ResolutionError::Transport(err) => {
                !matches!(
                    err,
                    ClientError::MissingToken | ClientError::InvalidRequest(_)
                ) && !err.is_client_error()
            }
        }
    }
}

/// Tunables for run resolution
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Number of status checks before giving up (at least 1)
    pub max_status_attempts: u32,

    /// Wait before the single extra check for a missing dataset id
    pub dataset_retry_delay: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_status_attempts: 20,
            dataset_retry_delay: Duration::from_secs(2),
        }
    }
}

/// A successfully resolved run
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub run_id: String,
    pub dataset_id: String,
    pub items: Vec<ResultItem>,
}

/// Polls a run until it is terminal, then fetches its dataset items
pub struct RunResolver<A> {
    api: A,
    backoff: Arc<dyn BackoffPolicy>,
    options: ResolverOptions,
}

impl<A: RemoteJobApi> RunResolver<A> {
    pub fn with_backoff(api: A, backoff: Arc<dyn BackoffPolicy>, options: ResolverOptions) -> Self {
        Self {
            api,
            backoff,
            options,
        }
    }

    /// Resolves a run into all of its dataset items
    pub async fn resolve(&self, run_id: &str) -> Result<ResolvedRun> {
        self.resolve_limited(run_id, None).await
    }

    /// Resolves a run into at most `limit` of its dataset items
    ///
    /// Either every fetched item is returned or an error is; never a partial
    /// list.
    pub async fn resolve_limited(&self, run_id: &str, limit: Option<u32>) -> Result<ResolvedRun> {
        let run_id = run_id.trim();
        if run_id.is_empty() {
            return Err(ResolutionError::InvalidRunId);
        }

        let run = self.wait_for_success(run_id).await?;
        let dataset_id = self.resolve_dataset_id(run_id, &run).await?;

        let items = self
            .api
            .list_dataset_items(&dataset_id, limit)
            .await
            .map_err(|e| {
                warn!(run_id, dataset_id = %dataset_id, "Dataset fetch failed: {}", e);
                ResolutionError::ResultFetchFailed {
                    detail: e.to_string(),
                }
            })?;

        info!(
            run_id,
            dataset_id = %dataset_id,
            items = items.len(),
            "Run resolved"
        );

        Ok(ResolvedRun {
            run_id: run_id.to_string(),
            dataset_id,
            items,
        })
    }

    /// Polls until the run succeeds, fails, or the attempt budget runs out
    async fn wait_for_success(&self, run_id: &str) -> Result<Run> {
        let max_attempts = self.options.max_status_attempts.max(1);

        for attempt in 1..=max_attempts {
            let run = self.api.get_run(run_id).await?;

            info!(
                run_id,
                attempt,
                max_attempts,
                status = %run.status,
                "Checked run status"
            );

            if run.status.is_success() {
                return Ok(run);
            }

            if run.status.is_failure() {
                warn!(run_id, status = %run.status, "Run ended without success");
                return Err(ResolutionError::RunFailed { status: run.status });
            }

            if attempt < max_attempts {
                let delay = self.backoff.next_delay(attempt);
                debug!(run_id, attempt, "Run pending, next check in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        warn!(run_id, max_attempts, "Gave up waiting for run");
        Err(ResolutionError::PollingTimedOut {
            attempts: max_attempts,
        })
    }

    /// The dataset id can trail the SUCCEEDED status, so a missing id gets one
    /// more look after `dataset_retry_delay`
    async fn resolve_dataset_id(&self, run_id: &str, run: &Run) -> Result<String> {
        if let Some(dataset_id) = run.dataset_id() {
            return Ok(dataset_id.to_string());
        }

        debug!(
            run_id,
            "Run succeeded without a dataset id, retrying in {:?}", self.options.dataset_retry_delay
        );
        tokio::time::sleep(self.options.dataset_retry_delay).await;

        let run = self.api.get_run(run_id).await?;
        run.dataset_id()
            .map(str::to_string)
            .ok_or_else(|| ResolutionError::ResultSetNotReady {
                run_id: run_id.to_string(),
            })
    }
}
