//! Giveaway Apify Client
//!
//! A small, type-safe HTTP client for the Apify v2 API, covering the calls the
//! relay needs: starting an actor run, reading a run, reading dataset items and
//! checking the token's account.
//!
//! # Example
//!
//! ```no_run
//! use giveaway_client::{ApifyClient, DEFAULT_BASE_URL};
//!
//! #[tokio::main]
//! async fn main() -> giveaway_client::Result<()> {
//!     let client = ApifyClient::new(DEFAULT_BASE_URL).with_token("apify_api_xxx");
//!
//!     let run = client.get_run("abc123").await?;
//!     println!("Run {} is {}", run.id, run.status);
//!     Ok(())
//! }
//! ```

mod account;
mod datasets;
pub mod error;
mod remote;
mod runs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use datasets::parse_items;
pub use remote::RemoteJobApi;

use reqwest::{Client, RequestBuilder, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Public Apify API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// HTTP client for the Apify API
///
/// Holds the base URL and the bearer credential explicitly; nothing is read
/// from the process environment here.
#[derive(Clone)]
pub struct ApifyClient {
    /// Base URL of the API (e.g., "https://api.apify.com/v2")
    base_url: String,
    /// Bearer token sent with every request
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for ApifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApifyClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.has_token())
            .finish()
    }
}

/// Apify wraps single-object responses in `{"data": ...}`
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

impl ApifyClient {
    /// Create a new client without credentials
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., "https://api.apify.com/v2")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use giveaway_client::ApifyClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApifyClient::with_client("https://api.apify.com/v2", http_client);
    /// assert!(!client.has_token());
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach the bearer token used for every request
    ///
    /// A blank token is ignored.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Builds an endpoint URL under the base URL
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`,
    /// `?` or `#` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Adds the JSON accept header and bearer credential
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(request
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and parse the body as JSON
    ///
    /// The body is read as text first so that non-JSON responses (proxy error
    /// pages and the like) surface as a parse error with an excerpt.
    async fn handle_json(&self, response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::ParseError(format!(
                "API returned non-JSON ({}): {}",
                e,
                error::truncate(text)
            ))
        })
    }

    /// Handle a response whose payload is wrapped in Apify's data envelope
    async fn handle_data<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let json = self.handle_json(response).await?;

        serde_json::from_value::<Envelope<T>>(json)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                ClientError::UnexpectedPayload(format!("unexpected response shape: {}", e))
            })
    }
}

/// Rejects identifiers that cannot name a single path segment
fn require_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} cannot be empty", kind)));
    }
    if id == "." || id == ".." {
        return Err(ClientError::InvalidRequest(format!("{} is not valid: {}", kind, id)));
    }
    Ok(id)
}
