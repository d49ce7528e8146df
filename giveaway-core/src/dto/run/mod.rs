//! Run DTOs
//!
//! Bodies for starting a scrape, reporting its status and returning its
//! winners, plus the actor input sent to the platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::item::ResultItem;
use crate::domain::run::RunStatus;

/// Caller request to start a comment scrape
///
/// The requested comment count is accepted under any of several names for
/// compatibility with older front-ends. `resultsLimit` takes precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRunRequest {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub results_limit: Option<Value>,

    #[serde(default)]
    pub limit: Option<Value>,

    #[serde(default)]
    pub count: Option<Value>,

    #[serde(default)]
    pub number_of_comments: Option<Value>,
}

/// Outcome of interpreting the requested comment count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsLimit {
    /// Nothing was requested; the configured default applies
    Default(u32),
    /// The request was within bounds
    Requested(u32),
    /// The request exceeded the ceiling and was lowered to it
    Clamped { requested: u64, applied: u32 },
}

impl ResultsLimit {
    pub fn value(&self) -> u32 {
        match *self {
            ResultsLimit::Default(n) | ResultsLimit::Requested(n) => n,
            ResultsLimit::Clamped { applied, .. } => applied,
        }
    }
}

impl StartRunRequest {
    /// The post URL, if present and not blank
    pub fn post_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// First non-null count field, in precedence order
    pub fn requested_limit(&self) -> Option<&Value> {
        [
            &self.results_limit,
            &self.limit,
            &self.count,
            &self.number_of_comments,
        ]
        .into_iter()
        .find_map(|v| v.as_ref().filter(|v| !v.is_null()))
    }

    /// Interprets the requested comment count
    ///
    /// Absent ⇒ `default`. A positive integer (JSON number or numeric string)
    /// is accepted and lowered to `max` if above it. Anything else is rejected
    /// with a message suitable for a 400 response.
    pub fn results_limit(&self, default: u32, max: u32) -> Result<ResultsLimit, String> {
        let Some(raw) = self.requested_limit() else {
            return Ok(ResultsLimit::Default(default));
        };

        let requested = parse_positive_integer(raw).ok_or_else(|| {
            format!("Invalid result count {}: expected a positive integer", raw)
        })?;

        if requested > u64::from(max) {
            Ok(ResultsLimit::Clamped {
                requested,
                applied: max,
            })
        } else {
            // bounded by `max` above
            Ok(ResultsLimit::Requested(requested as u32))
        }
    }
}

fn parse_positive_integer(raw: &Value) -> Option<u64> {
    let n = match raw {
        Value::Number(n) => match n.as_u64() {
            Some(n) => n,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 1.0 || f > u64::MAX as f64 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    (n > 0).then_some(n)
}

/// Input document for the Instagram comment scraper actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorInput {
    pub direct_urls: Vec<String>,
    pub include_nested_comments: bool,
    pub is_newest_comments: bool,
    pub results_limit: u32,
}

impl ActorInput {
    /// Top-level comments of a single post, in the actor's default order
    pub fn for_post(url: impl Into<String>, results_limit: u32) -> Self {
        Self {
            direct_urls: vec![url.into()],
            include_nested_comments: false,
            is_newest_comments: false,
            results_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRunResponse {
    pub success: bool,
    pub run_id: String,
}

/// Single status snapshot returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatusResponse {
    pub success: bool,
    pub status: RunStatus,
    pub dataset_id: Option<String>,
}

/// Items of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnersResponse {
    pub success: bool,
    pub run_id: String,
    pub dataset_id: String,
    pub items: Vec<ResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> StartRunRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_missing_limit_uses_default() {
        let req = request(json!({ "url": "https://www.instagram.com/p/xyz/" }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Default(2)));

        let req = request(json!({ "url": "u", "resultsLimit": null }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Default(2)));
    }

    #[test]
    fn test_limit_aliases_in_precedence_order() {
        let req = request(json!({ "url": "u", "count": 7, "numberOfComments": 9 }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Requested(7)));

        let req = request(json!({ "url": "u", "resultsLimit": 3, "limit": 4 }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Requested(3)));

        let req = request(json!({ "url": "u", "numberOfComments": "12" }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Requested(12)));
    }

    #[test]
    fn test_limit_above_max_is_clamped() {
        let req = request(json!({ "url": "u", "resultsLimit": 1000 }));
        let limit = req.results_limit(2, 500).unwrap();
        assert_eq!(
            limit,
            ResultsLimit::Clamped {
                requested: 1000,
                applied: 500
            }
        );
        assert_eq!(limit.value(), 500);
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        for bad in [json!(0), json!(-3), json!(2.5), json!("ten"), json!(true), json!([])] {
            let req = request(json!({ "url": "u", "resultsLimit": bad }));
            assert!(req.results_limit(2, 500).is_err(), "{bad} should be rejected");
        }

        let req = request(json!({ "url": "u", "resultsLimit": 4.0 }));
        assert_eq!(req.results_limit(2, 500), Ok(ResultsLimit::Requested(4)));
    }

    #[test]
    fn test_post_url_blank_is_missing() {
        assert_eq!(request(json!({ "url": "   " })).post_url(), None);
        assert_eq!(request(json!({})).post_url(), None);
        assert_eq!(request(json!({ "url": " a " })).post_url(), Some("a"));
    }

    #[test]
    fn test_actor_input_wire_format() {
        let input = ActorInput::for_post("https://www.instagram.com/p/xyz/", 5);
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "directUrls": ["https://www.instagram.com/p/xyz/"],
                "includeNestedComments": false,
                "isNewestComments": false,
                "resultsLimit": 5
            })
        );
    }
}
