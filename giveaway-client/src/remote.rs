//! Remote job API seam
//!
//! The read-only subset of the Apify API that run resolution depends on.
//! Kept as a trait so resolution can be exercised against scripted fakes.

use async_trait::async_trait;
use giveaway_core::domain::item::ResultItem;
use giveaway_core::domain::run::Run;

use crate::ApifyClient;
use crate::error::Result;

#[async_trait]
pub trait RemoteJobApi: Send + Sync {
    /// Fetches the current snapshot of a run
    async fn get_run(&self, run_id: &str) -> Result<Run>;

    /// Fetches the items of a dataset, optionally capped at `limit`
    async fn list_dataset_items(
        &self,
        dataset_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<ResultItem>>;
}

#[async_trait]
impl RemoteJobApi for ApifyClient {
    async fn get_run(&self, run_id: &str) -> Result<Run> {
        ApifyClient::get_run(self, run_id).await
    }

    async fn list_dataset_items(
        &self,
        dataset_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<ResultItem>> {
        ApifyClient::list_dataset_items(self, dataset_id, limit).await
    }
}
