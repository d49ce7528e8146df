//! Error types for the Apify client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest upstream body excerpt carried in an error
pub const MAX_ERROR_BODY_CHARS: usize = 300;

/// Errors that can occur when talking to the Apify API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body excerpt
        message: String,
    },

    /// Response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response was JSON but of the wrong shape
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// No API token was configured
    #[error("APIFY_API_TOKEN missing")]
    MissingToken,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and response body
    ///
    /// The body is cut to [`MAX_ERROR_BODY_CHARS`] characters.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: truncate(message.into()),
        }
    }

    /// HTTP status reported by the API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the token was rejected or lacks access
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }
}

pub(crate) fn truncate(mut text: String) -> String {
    if let Some((idx, _)) = text.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_body_is_truncated() {
        let err = ClientError::api_error(500, "é".repeat(400));
        match err {
            ClientError::ApiError { message, .. } => {
                assert_eq!(message.chars().count(), MAX_ERROR_BODY_CHARS)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_helpers() {
        assert!(ClientError::api_error(404, "").is_not_found());
        assert!(ClientError::api_error(401, "").is_unauthorized());
        assert!(ClientError::api_error(403, "").is_unauthorized());
        assert!(ClientError::api_error(429, "").is_client_error());
        assert!(!ClientError::api_error(503, "").is_client_error());
        assert!(!ClientError::MissingToken.is_client_error());
        assert_eq!(ClientError::ParseError("x".into()).status(), None);
    }
}
