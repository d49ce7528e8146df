//! Run domain types
//!
//! A run is one asynchronous execution of the scraping actor on the remote
//! platform. Only the fields the relay inspects are typed; everything else the
//! provider returns is kept in `extra` and forwarded as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a remote actor run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    #[serde(default)]
    pub id: String,

    pub status: RunStatus,

    /// Identifier of the dataset the run writes into. May lag behind the run
    /// reaching `SUCCEEDED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dataset_id: Option<String>,

    /// Provider fields the relay does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Run {
    pub fn new(id: impl Into<String>, status: RunStatus) -> Self {
        Self {
            id: id.into(),
            status,
            default_dataset_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.default_dataset_id = Some(dataset_id.into());
        self
    }

    /// Returns the dataset id if it is populated.
    ///
    /// The provider occasionally reports an empty string before the dataset
    /// exists, which is treated the same as a missing id.
    pub fn dataset_id(&self) -> Option<&str> {
        self.default_dataset_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Run status as reported by the provider
///
/// Unrecognised values are kept verbatim in `Other` and count as pending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    Aborted,
    TimedOut,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Ready => "READY",
            RunStatus::Running => "RUNNING",
            RunStatus::Succeeded => "SUCCEEDED",
            RunStatus::Failed => "FAILED",
            RunStatus::Aborted => "ABORTED",
            RunStatus::TimedOut => "TIMED-OUT",
            RunStatus::Other(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Succeeded)
    }

    /// Terminal states in which the run will never produce a dataset
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Aborted | RunStatus::TimedOut
        )
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "READY" => RunStatus::Ready,
            "RUNNING" => RunStatus::Running,
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" => RunStatus::Failed,
            "ABORTED" => RunStatus::Aborted,
            "TIMED-OUT" => RunStatus::TimedOut,
            _ => RunStatus::Other(s),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_run_keeps_extra_fields() {
        let run: Run = serde_json::from_value(json!({
            "id": "abc123",
            "actId": "SbK00X0JYCPblD2wp",
            "status": "SUCCEEDED",
            "defaultDatasetId": "ds1",
            "stats": { "computeUnits": 0.01 }
        }))
        .unwrap();

        assert_eq!(run.id, "abc123");
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.dataset_id(), Some("ds1"));
        assert_eq!(run.extra.get("actId"), Some(&json!("SbK00X0JYCPblD2wp")));
        assert!(run.extra.contains_key("stats"));

        let back = serde_json::to_value(&run).unwrap();
        assert_eq!(back["defaultDatasetId"], "ds1");
        assert_eq!(back["stats"]["computeUnits"], 0.01);
    }

    #[test]
    fn test_missing_or_empty_dataset_id() {
        let run: Run = serde_json::from_value(json!({ "status": "RUNNING" })).unwrap();
        assert_eq!(run.dataset_id(), None);

        let run: Run =
            serde_json::from_value(json!({ "status": "SUCCEEDED", "defaultDatasetId": "" }))
                .unwrap();
        assert_eq!(run.dataset_id(), None);

        let run: Run =
            serde_json::from_value(json!({ "status": "SUCCEEDED", "defaultDatasetId": null }))
                .unwrap();
        assert_eq!(run.dataset_id(), None);
    }

    #[test]
    fn test_status_classification() {
        assert!(RunStatus::Succeeded.is_success());
        assert!(!RunStatus::Succeeded.is_failure());

        for status in [RunStatus::Failed, RunStatus::Aborted, RunStatus::TimedOut] {
            assert!(status.is_failure(), "{status} should be a failure");
            assert!(!status.is_success());
        }

        for status in [
            RunStatus::Ready,
            RunStatus::Running,
            RunStatus::Other("TIMING-OUT".to_string()),
        ] {
            assert!(
                !status.is_success() && !status.is_failure(),
                "{status} should be pending"
            );
        }
    }

    #[test]
    fn test_unknown_status_round_trips_verbatim() {
        let status: RunStatus = serde_json::from_value(json!("ABORTING")).unwrap();
        assert_eq!(status, RunStatus::Other("ABORTING".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("ABORTING"));
        assert_eq!(
            serde_json::to_value(RunStatus::TimedOut).unwrap(),
            json!("TIMED-OUT")
        );
    }
}
