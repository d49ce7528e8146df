//! Actor run endpoints

use crate::error::Result;
use crate::{ApifyClient, require_id};
use giveaway_core::domain::run::Run;
use giveaway_core::dto::run::ActorInput;

impl ApifyClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Start a run of an actor
    ///
    /// # Arguments
    /// * `actor_id` - Actor ID or `username~actor-name`
    /// * `input` - The actor input document
    ///
    /// # Returns
    /// The freshly created run, usually in `READY` state
    ///
    /// # Example
    /// ```no_run
    /// # use giveaway_client::ApifyClient;
    /// # use giveaway_core::dto::run::ActorInput;
    /// # async fn example() -> giveaway_client::Result<()> {
    /// let client = ApifyClient::new("https://api.apify.com/v2").with_token("apify_api_xxx");
    /// let run = client
    ///     .start_run("SbK00X0JYCPblD2wp", &ActorInput::for_post("https://www.instagram.com/p/xyz/", 5))
    ///     .await?;
    /// println!("Started run {}", run.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_run(&self, actor_id: &str, input: &ActorInput) -> Result<Run> {
        let actor_id = require_id("Actor ID", actor_id)?;
        let url = self.endpoint(&["acts", actor_id, "runs"])?;
        let response = self
            .authorized(self.client.post(url))?
            .json(input)
            .send()
            .await?;

        let run: Run = self.handle_data(response).await?;
        tracing::debug!(run_id = %run.id, status = %run.status, "Actor run started");

        Ok(run)
    }

    /// Get the current snapshot of a run
    ///
    /// # Arguments
    /// * `run_id` - The run ID
    pub async fn get_run(&self, run_id: &str) -> Result<Run> {
        let run_id = require_id("Run ID", run_id)?;
        let url = self.endpoint(&["actor-runs", run_id])?;
        let response = self.authorized(self.client.get(url))?.send().await?;

        self.handle_data(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use giveaway_core::domain::run::RunStatus;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApifyClient {
        ApifyClient::new(server.uri()).with_token("test-token")
    }

    #[tokio::test]
    async fn test_get_run_unwraps_data_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actor-runs/abc123"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "abc123",
                    "status": "SUCCEEDED",
                    "defaultDatasetId": "ds1",
                    "actId": "SbK00X0JYCPblD2wp"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let run = client_for(&server).await.get_run("abc123").await.unwrap();
        assert_eq!(run.id, "abc123");
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.dataset_id(), Some("ds1"));
        assert_eq!(run.extra["actId"], "SbK00X0JYCPblD2wp");
    }

    #[tokio::test]
    async fn test_error_status_carries_truncated_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actor-runs/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("x".repeat(1000)))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_run("missing").await.unwrap_err();
        assert!(err.is_not_found());
        match err {
            ClientError::ApiError { message, .. } => assert_eq!(message.len(), 300),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actor-runs/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_run("abc123").await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(msg) if msg.contains("<html>")));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_unexpected_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actor-runs/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc123" })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_run("abc123").await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedPayload(_)));
    }

    #[tokio::test]
    async fn test_traversal_in_run_id_stays_in_actor_runs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "u1" } })))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .get_run("../users/me")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_start_run_posts_actor_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/acts/SbK00X0JYCPblD2wp/runs"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "directUrls": ["https://www.instagram.com/p/xyz/"],
                "includeNestedComments": false,
                "isNewestComments": false,
                "resultsLimit": 5
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": { "id": "run-1", "status": "READY" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let input = ActorInput::for_post("https://www.instagram.com/p/xyz/", 5);
        let run = client_for(&server)
            .await
            .start_run("SbK00X0JYCPblD2wp", &input)
            .await
            .unwrap();
        assert_eq!(run.id, "run-1");
        assert_eq!(run.status, RunStatus::Ready);
        assert_eq!(run.dataset_id(), None);
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApifyClient::new(server.uri());
        assert!(matches!(
            client.get_run("abc123").await,
            Err(ClientError::MissingToken)
        ));
    }
}
