//! Error responses.
//!
//! # Responsibilities
//! - Map every handler failure to exactly one HTTP status
//! - Render a JSON body `{"error": "..."}` with a human-readable message
//!
//! # Design Decisions
//! - Upstream failures surface as 502/503; malformed upstream data as 500
//! - An empty part list is 404, never an empty 200

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bilibili::UpstreamError;

/// Failures surfaced by the parts endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing 'url' parameter")]
    MissingParameter,

    #[error("invalid BV id or video link")]
    InvalidInput,

    #[error("only GET requests are supported")]
    MethodNotAllowed,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter | ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(e) => match e {
                UpstreamError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                UpstreamError::Status { .. } | UpstreamError::Application { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                UpstreamError::NotFound => StatusCode::NOT_FOUND,
                UpstreamError::Parse(_) | UpstreamError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message shown to callers. Transport and parser details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream(e) => match e {
                UpstreamError::Unavailable(_) => {
                    "cannot reach Bilibili API or request timed out".to_string()
                }
                UpstreamError::Status { status } => {
                    format!("Bilibili API error, status: {}", status)
                }
                UpstreamError::Parse(_) => "failed to parse Bilibili data".to_string(),
                UpstreamError::Application { code, message } => {
                    format!("Bilibili API error: {} (code: {})", message, code)
                }
                UpstreamError::NotFound => "no parts found for this video".to_string(),
                UpstreamError::Internal(_) => "internal server error".to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
