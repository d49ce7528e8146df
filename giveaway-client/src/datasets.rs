//! Dataset endpoints

use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::{ApifyClient, require_id};
use giveaway_core::domain::item::ResultItem;

impl ApifyClient {
    /// List the items of a dataset
    ///
    /// Items are requested in Apify's `clean` form. The response must be a
    /// JSON array; anything else is reported as
    /// [`ClientError::UnexpectedPayload`] rather than coerced.
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset ID
    /// * `limit` - Optional maximum number of items
    pub async fn list_dataset_items(
        &self,
        dataset_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<ResultItem>> {
        let dataset_id = require_id("Dataset ID", dataset_id)?;
        let url = self.endpoint(&["datasets", dataset_id, "items"])?;

        let mut request = self.client.get(url).query(&[("clean", "true")]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = self.authorized(request)?.send().await?;
        let json = self.handle_json(response).await?;

        parse_items(json)
    }
}

/// Accepts only a JSON array of items
///
/// Shared with callers that obtain item payloads by other means, so they
/// apply the same shape check as [`ApifyClient::list_dataset_items`].
pub fn parse_items(json: Value) -> Result<Vec<ResultItem>> {
    match json {
        Value::Array(items) => Ok(items.into_iter().map(ResultItem::from).collect()),
        other => Err(ClientError::UnexpectedPayload(format!(
            "expected an array of dataset items, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
