//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::{ServiceConfig, DEFAULT_API_TIMEOUT_SECS};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}")]
    InvalidVar { name: &'static str, value: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from environment variables.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Unset and empty variables both select the default.
pub fn load_from_lookup<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut config = ServiceConfig::default();

    if let Some(port) = get("PORT") {
        config.listener.port = port.parse().map_err(|_| ConfigError::InvalidVar {
            name: "PORT",
            value: port.clone(),
        })?;
    }
    if let Some(host) = get("BIND_HOST") {
        config.listener.host = host;
    }

    if let Some(origins) = get("ALLOWED_ORIGINS") {
        config.cors.allowed_origins = parse_origins(&origins);
    }

    if let Some(raw) = get("API_TIMEOUT") {
        config.upstream.timeout_secs = parse_timeout(&raw);
    }
    if let Some(user_agent) = get("USER_AGENT") {
        config.upstream.user_agent = user_agent;
    }
    if let Some(base_url) = get("UPSTREAM_BASE_URL") {
        config.upstream.base_url = base_url.trim_end_matches('/').to_string();
    }

    config.observability.debug = get("DEBUG").as_deref() == Some("true");
    config.observability.metrics_enabled = get("METRICS_ENABLED").as_deref() == Some("true");
    if let Some(addr) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = addr;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Split a comma-separated allow-list, dropping blank entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Parse `API_TIMEOUT`, falling back to the default on garbage or non-positive values.
fn parse_timeout(raw: &str) -> u64 {
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => secs as u64,
        _ => {
            tracing::warn!(
                value = %raw,
                default_secs = DEFAULT_API_TIMEOUT_SECS,
                "Invalid API_TIMEOUT, using default"
            );
            DEFAULT_API_TIMEOUT_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.listener.port, 2323);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:2233"]);
        assert!(!config.observability.debug);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,,"),
            ("API_TIMEOUT", "3"),
            ("USER_AGENT", "agent/1.0"),
            ("UPSTREAM_BASE_URL", "http://127.0.0.1:9000/"),
            ("DEBUG", "true"),
        ])
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.upstream.user_agent, "agent/1.0");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000");
        assert!(config.observability.debug);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        for raw in ["abc", "0", "-5", "1.5"] {
            let config = load(&[("API_TIMEOUT", raw)]).unwrap();
            assert_eq!(config.upstream.timeout_secs, 10, "input {raw:?}");
        }
    }

    #[test]
    fn test_debug_requires_exact_true() {
        assert!(!load(&[("DEBUG", "TRUE")]).unwrap().observability.debug);
        assert!(!load(&[("DEBUG", "1")]).unwrap().observability.debug);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'http' for PORT");
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = load(&[("UPSTREAM_BASE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("not a url"));
    }
}
