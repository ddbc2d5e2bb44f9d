//! Page-list API client with timeout and error classification.
//!
//! # Responsibilities
//! - Build the page-list URL and browser-like headers for a BV id
//! - Perform exactly one GET bounded by the configured timeout
//! - Classify every failure into an [`UpstreamError`]

use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Instant;

use crate::bilibili::extractor::Bvid;
use crate::bilibili::types::{PagelistEnvelope, UpstreamConfig, UpstreamError, UpstreamPart, UpstreamResult};
use crate::observability::metrics;

const PAGELIST_PATH: &str = "/x/player/pagelist";

/// Client for the upstream page-list API.
#[derive(Clone)]
pub struct BilibiliClient {
    http: reqwest::Client,
    config: UpstreamConfig,
    user_agent: HeaderValue,
    debug: bool,
}

impl BilibiliClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Upstream configuration
    /// * `debug` - Log raw response bodies
    pub fn new(config: UpstreamConfig, debug: bool) -> UpstreamResult<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| UpstreamError::Internal(format!("invalid user agent: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| UpstreamError::Internal(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            config,
            user_agent,
            debug,
        })
    }

    /// Full page-list URL for `bvid`.
    pub fn pagelist_url(&self, bvid: &Bvid) -> String {
        format!("{}{}?bvid={}", self.config.base_url, PAGELIST_PATH, bvid)
    }

    fn headers(&self, bvid: &Bvid) -> UpstreamResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let referer = format!("{}{}", self.config.referer_base, bvid);
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer)
                .map_err(|e| UpstreamError::Internal(format!("invalid referer: {}", e)))?,
        );
        headers.insert(USER_AGENT, self.user_agent.clone());
        Ok(headers)
    }

    /// Fetch the ordered part list for `bvid`.
    ///
    /// An empty list is reported as [`UpstreamError::NotFound`].
    pub async fn fetch_parts(&self, bvid: &Bvid) -> UpstreamResult<Vec<UpstreamPart>> {
        let start = Instant::now();
        let result = self.fetch_parts_inner(bvid).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_upstream(outcome, start);

        result
    }

    async fn fetch_parts_inner(&self, bvid: &Bvid) -> UpstreamResult<Vec<UpstreamPart>> {
        let url = self.pagelist_url(bvid);
        tracing::info!(bvid = %bvid, url = %url, "Fetching part list from upstream");

        let response = self
            .http
            .get(&url)
            .headers(self.headers(bvid)?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(bvid = %bvid, error = %e, timeout = e.is_timeout(), "Upstream request failed");
                UpstreamError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        tracing::info!(bvid = %bvid, status = status.as_u16(), "Received upstream response");

        // Consuming the body returns the connection to the pool on every path.
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(bvid = %bvid, error = %e, "Failed to read upstream body");
            if e.is_timeout() || e.is_connect() || e.is_body() {
                UpstreamError::Unavailable(e.to_string())
            } else {
                UpstreamError::Internal(e.to_string())
            }
        })?;

        if self.debug {
            tracing::info!(bvid = %bvid, body = %String::from_utf8_lossy(&body), "Upstream raw response body");
        }

        if !status.is_success() {
            tracing::warn!(
                bvid = %bvid,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Upstream returned non-success status"
            );
            return Err(UpstreamError::Status { status: status.as_u16() });
        }

        let envelope: PagelistEnvelope = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                bvid = %bvid,
                error = %e,
                body = %String::from_utf8_lossy(&body),
                "Failed to parse upstream envelope"
            );
            UpstreamError::Parse(e)
        })?;

        parts_from_envelope(bvid, envelope)
    }
}

/// Apply the envelope-level checks: application code first, then emptiness.
pub fn parts_from_envelope(bvid: &Bvid, envelope: PagelistEnvelope) -> UpstreamResult<Vec<UpstreamPart>> {
    if envelope.code != 0 {
        tracing::warn!(
            bvid = %bvid,
            code = envelope.code,
            message = %envelope.message,
            "Upstream returned application error"
        );
        return Err(UpstreamError::Application {
            code: envelope.code,
            message: envelope.message,
        });
    }

    let parts = envelope.data.unwrap_or_default();
    if parts.is_empty() {
        tracing::info!(bvid = %bvid, "No parts found for this video");
        return Err(UpstreamError::NotFound);
    }

    Ok(parts)
}
