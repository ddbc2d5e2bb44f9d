//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntax and fallbacks)
//! - Upstream base URL must be an absolute http(s) URL
//! - Header values sent upstream must be representable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before the server is constructed

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("upstream base URL '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("referer base '{0}' is not an absolute http(s) URL")]
    InvalidRefererBase(String),

    #[error("user agent is not a valid header value")]
    InvalidUserAgent,

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("metrics address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if !is_http_url(&config.upstream.base_url) {
        errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone()));
    }

    if !is_http_url(&config.upstream.referer_base) {
        errors.push(ValidationError::InvalidRefererBase(
            config.upstream.referer_base.clone(),
        ));
    }

    if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::InvalidUserAgent);
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
