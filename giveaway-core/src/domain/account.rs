//! Account domain type
//!
//! Identity of the token holder, used to verify the configured credential.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
