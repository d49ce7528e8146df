//! Dataset item domain type

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record produced by the scraping actor
///
/// The shape is defined by the actor, not by the relay, so the record is kept
/// as raw JSON and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(pub Value);

impl ResultItem {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ResultItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
