//! Health Check API Handlers
//!
//! Liveness, configuration and token checks for monitoring.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use giveaway_client::ClientError;
use serde_json::{Value, json};

use crate::api::AppState;
use crate::api::error::parse_details;

/// GET /
pub async fn root() -> &'static str {
    "Giveaway API is running"
}

/// GET /health
/// Health check endpoint, also reporting whether a token is configured
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "hasToken": state.client.has_token() }))
}

/// GET /debug/apify
/// Verify the configured token against the account endpoint
pub async fn debug_apify(State(state): State<AppState>) -> Response {
    if !state.client.has_token() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": "APIFY_API_TOKEN missing" })),
        )
            .into_response();
    }

    match state.client.get_account().await {
        Ok(account) => {
            tracing::debug!(account_id = %account.id, "Apify token verified");
            Json(json!({
                "ok": true,
                "status": StatusCode::OK.as_u16(),
                "account": { "id": account.id, "username": account.username },
                "raw": account,
            }))
            .into_response()
        }
        Err(err) => {
            tracing::warn!("Apify token check failed: {}", err);
            let status = err
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let error = err.to_string();
            (
                status,
                Json(json!({
                    "ok": false,
                    "status": status.as_u16(),
                    "account": null,
                    "error": error,
                    "raw": raw_body(err),
                })),
            )
                .into_response()
        }
    }
}

/// Upstream body of a failed check, kept for diagnosing token problems
fn raw_body(err: ClientError) -> Value {
    match err {
        ClientError::ApiError { message, .. } => parse_details(message),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::config::Config;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use giveaway_client::ApifyClient;
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn check_token(server: &MockServer) -> (StatusCode, Value) {
        let client = ApifyClient::new(server.uri()).with_token("test-token");
        let app = create_router(AppState::new(Config::default(), client));
        let request = Request::builder()
            .uri("/debug/apify")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_reports_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "id": "u1", "username": "giveaways", "plan": { "id": "FREE" } }
            })))
            .mount(&server)
            .await;

        let (status, body) = check_token(&server).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["account"], json!({ "id": "u1", "username": "giveaways" }));
        assert_eq!(body["raw"]["plan"]["id"], "FREE");
    }

    #[tokio::test]
    async fn test_rejected_token_forwards_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": { "type": "token-not-valid" } })),
            )
            .mount(&server)
            .await;

        let (status, body) = check_token(&server).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 401);
        assert_eq!(body["raw"]["error"]["type"], "token-not-valid");
    }

    #[test]
    fn test_raw_body_of_non_http_error() {
        assert_eq!(
            raw_body(ClientError::ParseError("bad".to_string())),
            Value::String("Failed to parse response: bad".to_string())
        );
    }
}
