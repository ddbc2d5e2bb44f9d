//! Parts endpoint handlers.
//!
//! # Request Flow
//! ```text
//! GET /bilibili-parts?url=...
//!     → require `url`
//!     → extract BV id
//!     → fetch from upstream
//!     → translate and respond {"parts": [...]}
//! OPTIONS /bilibili-parts → 200, empty body
//! anything else          → 405
//! ```

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::bilibili::{extract_bvid, translate, PartsResponse};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /bilibili-parts`
pub async fn get_parts(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let response = match resolve_parts(&state, &request_id, query).await {
        Ok(body) => {
            tracing::info!(
                request_id = %request_id,
                parts = body.parts.len(),
                "Returned parts to caller"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, status = status.as_u16(), error = %err, "Parts request failed");
            } else {
                tracing::warn!(request_id = %request_id, status = status.as_u16(), error = %err, "Parts request rejected");
            }
            err.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start);
    response
}

async fn resolve_parts(
    state: &AppState,
    request_id: &str,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<PartsResponse, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Malformed query string");
        ApiError::InvalidInput
    })?;

    let input = first_url_param(pairs).ok_or(ApiError::MissingParameter)?;

    let bvid = extract_bvid(&input).ok_or_else(|| {
        tracing::warn!(request_id = %request_id, input = %input, "No BV id in input");
        ApiError::InvalidInput
    })?;

    tracing::info!(request_id = %request_id, bvid = %bvid, "Resolving parts");

    let parts = state.client.fetch_parts(&bvid).await?;
    Ok(translate(parts))
}

/// First `url` value in the query; a repeated key is not an error.
fn first_url_param(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `OPTIONS /bilibili-parts`
pub async fn preflight(headers: HeaderMap) -> StatusCode {
    tracing::debug!(request_id = %request_id(&headers), "CORS preflight");
    StatusCode::OK
}

/// Any other method on the parts route.
pub async fn method_not_allowed(method: Method) -> ApiError {
    tracing::warn!(method = %method, "Unsupported method on parts endpoint");
    ApiError::MethodNotAllowed
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
