//! Account endpoints

use crate::ApifyClient;
use crate::error::Result;
use giveaway_core::domain::account::Account;

impl ApifyClient {
    /// Get the account that owns the configured token
    ///
    /// Useful to verify that the token is valid without starting a run.
    pub async fn get_account(&self) -> Result<Account> {
        let url = self.endpoint(&["users", "me"])?;
        let response = self.authorized(self.client.get(url))?.send().await?;

        self.handle_data(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_account_is_read_from_users_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "id": "u1", "username": "giveaways", "plan": { "id": "FREE" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApifyClient::new(server.uri()).with_token("test-token");
        let account = client.get_account().await.unwrap();
        assert_eq!(account.id, "u1");
        assert_eq!(account.username.as_deref(), Some("giveaways"));
    }

    #[tokio::test]
    async fn test_rejected_token_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": { "type": "token-not-valid" } })),
            )
            .mount(&server)
            .await;

        let client = ApifyClient::new(server.uri()).with_token("stale");
        let err = client.get_account().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
    }
}
