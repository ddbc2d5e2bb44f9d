//! Cross-origin permission headers.
//!
//! Requests are never blocked here: when the `Origin` is not allowed the
//! permission headers are simply left off and the browser enforces the rest.

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const ALLOW_METHODS: &str = "GET, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// Origin allow-list shared by all requests.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Arc<[String]>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins: allowed_origins.into(),
        }
    }

    /// First allow-list entry matching `origin` exactly, or `*`.
    pub fn allowed_origin(&self, origin: Option<&str>) -> Option<&str> {
        self.allowed_origins
            .iter()
            .map(String::as_str)
            .find(|allowed| *allowed == "*" || Some(*allowed) == origin)
    }
}

pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let mut response = next.run(req).await;

    let Some(allowed) = policy.allowed_origin(origin.as_deref()) else {
        if let Some(origin) = origin {
            tracing::debug!(origin = %origin, "Origin not in allow-list, omitting CORS headers");
        }
        return response;
    };

    let Ok(allow_origin) = HeaderValue::from_str(allowed) else {
        tracing::warn!(origin = %allowed, "Allowed origin is not a valid header value");
        return response;
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    if allowed != "*" {
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }

    response
}
