//! API Error Handling
//!
//! Unified error types and conversion for API responses.
//!
//! Every failure is rendered as
//! `{"success": false, "error": <message>, "details"?: <json>, "retryable"?: bool}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use giveaway_client::ClientError;
use serde_json::{Value, json};

use crate::service::resolver::ResolutionError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Server has no Apify token configured
    MissingToken,
    /// Apify answered with an error or an unusable body
    Upstream {
        status: StatusCode,
        message: String,
        details: Option<Value>,
    },
    Resolution(ResolutionError),
}

impl ApiError {
    /// Wraps a client error, describing what the relay was trying to do
    pub fn upstream(context: &str, err: ClientError) -> Self {
        let unauthorized = err.is_unauthorized();
        match err {
            ClientError::MissingToken => ApiError::MissingToken,
            ClientError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ClientError::ApiError { status, message } if unauthorized => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::UNAUTHORIZED),
                message: "Unauthorized: Check APIFY_API_TOKEN or actor access permissions."
                    .to_string(),
                details: Some(parse_details(message)),
            },
            ClientError::ApiError { status, message } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: context.to_string(),
                details: Some(parse_details(message)),
            },
            ClientError::ParseError(msg) => ApiError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: "Apify returned non-JSON".to_string(),
                details: Some(Value::String(msg)),
            },
            ClientError::UnexpectedPayload(msg) => ApiError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: context.to_string(),
                details: Some(Value::String(msg)),
            },
            ClientError::RequestFailed(err) => ApiError::Upstream {
                status: if err.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                },
                message: context.to_string(),
                details: Some(Value::String(err.to_string())),
            },
        }
    }

    /// HTTP status this error is rendered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Resolution(err) => match err {
                ResolutionError::InvalidRunId => StatusCode::BAD_REQUEST,
                ResolutionError::RunFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ResolutionError::PollingTimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
                ResolutionError::ResultSetNotReady { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ResolutionError::ResultFetchFailed { .. } => StatusCode::BAD_GATEWAY,
                ResolutionError::Transport(ClientError::MissingToken) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ResolutionError::Transport(e) if e.is_not_found() => StatusCode::NOT_FOUND,
                ResolutionError::Transport(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

/// Upstream bodies are usually JSON error documents; keep them structured
pub(crate) fn parse_details(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::BadRequest(msg) => {
                json!({ "success": false, "error": msg })
            }
            ApiError::MissingToken => {
                tracing::error!("Request needs Apify but no token is configured");
                json!({ "success": false, "error": "APIFY_API_TOKEN missing in server" })
            }
            ApiError::Upstream {
                message, details, ..
            } => {
                tracing::warn!(status = status.as_u16(), "Upstream error: {}", message);
                let mut body = json!({ "success": false, "error": message });
                if let Some(details) = details {
                    body["details"] = details;
                }
                body
            }
            ApiError::Resolution(err) => {
                tracing::warn!("Run resolution failed: {}", err);
                let mut body = json!({
                    "success": false,
                    "error": err.to_string(),
                    "retryable": err.is_retryable(),
                });
                if let ResolutionError::RunFailed { status: run_status } = &err {
                    body["status"] = Value::String(run_status.to_string());
                }
                body
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Transport(ClientError::InvalidRequest(msg)) => {
                ApiError::BadRequest(msg)
            }
            other => ApiError::Resolution(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
