//! Error handling for the proxy gateway
//!
//! Every failure is converted to a JSON body plus status at the
//! handler boundary; nothing propagates uncaught to the process level.
//! The wire shapes mirror what callers of the proxy already parse:
//! request-side rejections carry a bare `error` field, upstream-side
//! failures carry the `success:false` triple.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use common::error::Error;

/// Request-side rejection body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// Upstream-side failure body
#[derive(Debug, Serialize)]
pub struct FailureBody {
    /// Always false
    pub success: bool,
    /// Error category message
    pub error: String,
    /// Underlying error detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed, incomplete or unsupported request input
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The exchange rejected the caller's API credentials
    #[error("Exchange authentication failed: {0}")]
    ExchangeAuth(String),

    /// Transport failure between the proxy and the exchange
    #[error("Upstream network failure: {0}")]
    Upstream(String),

    /// Anything else that went wrong while proxying
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Connection-test failure, reported without a taxonomy split
    #[error("Connection test failed: {0}")]
    ConnectionTest(String),
}

/// Map connector errors onto the gateway taxonomy
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingField(_) | Error::UnsupportedExchange(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::ExchangeAuth(details) => ApiError::ExchangeAuth(details),
            Error::Network(details) => ApiError::Upstream(details),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error for backend tracing before it is flattened
        // into the response body
        tracing::error!("API error: {:?}", &self);

        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::ExchangeAuth(details) => (
                StatusCode::UNAUTHORIZED,
                Json(FailureBody {
                    success: false,
                    error: "Authentication failed".to_string(),
                    details: Some(details),
                }),
            )
                .into_response(),
            ApiError::Upstream(details) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(FailureBody {
                    success: false,
                    error: "Network error".to_string(),
                    details: Some(details),
                }),
            )
                .into_response(),
            ApiError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureBody {
                    success: false,
                    error: "Internal server error".to_string(),
                    details: Some(details),
                }),
            )
                .into_response(),
            ApiError::ConnectionTest(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureBody {
                    success: false,
                    error: msg,
                    details: None,
                }),
            )
                .into_response(),
        }
    }
}
