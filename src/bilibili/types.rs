//! Upstream wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export UpstreamConfig from config module to avoid duplication
pub use crate::config::schema::UpstreamConfig;

/// Envelope returned by the page-list API.
#[derive(Debug, Clone, Deserialize)]
pub struct PagelistEnvelope {
    /// Application status; zero on success. Absent means zero.
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub ttl: i64,

    /// Parts in page order. Error envelopes carry `null` or omit it.
    #[serde(default)]
    pub data: Option<Vec<UpstreamPart>>,
}

/// One part as the upstream describes it. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamPart {
    pub cid: i64,
    pub page: i64,
    /// Part title.
    pub part: String,
    /// Length in seconds.
    pub duration: i64,
}

/// One part as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPart {
    pub cid: i64,
    pub page: i64,
    pub title: String,
    pub duration: i64,
}

/// Success body of the parts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsResponse {
    pub parts: Vec<PublicPart>,
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection failed or the request timed out.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned status {status}")]
    Status { status: u16 },

    /// Body was not a valid envelope.
    #[error("failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Envelope carried a non-zero application code.
    #[error("upstream application error: {message} (code: {code})")]
    Application { code: i64, message: String },

    /// Envelope was valid but listed no parts.
    #[error("no parts found")]
    NotFound,

    /// Request construction or body handling failed locally.
    #[error("internal upstream client error: {0}")]
    Internal(String),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unavailable(_) => "unavailable",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Parse(_) => "parse",
            UpstreamError::Application { .. } => "application",
            UpstreamError::NotFound => "not_found",
            UpstreamError::Internal(_) => "internal",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ignores_unknown_fields() {
        let body = r#"{
            "code": 0,
            "message": "0",
            "ttl": 1,
            "data": [{
                "cid": 279786,
                "page": 1,
                "from": "vupload",
                "part": "intro",
                "duration": 61,
                "vid": "",
                "weblink": "",
                "dimension": {"width": 1920, "height": 1080, "rotate": 0}
            }]
        }"#;
        let envelope: PagelistEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.code, 0);
        assert_eq!(
            envelope.data.unwrap(),
            vec![UpstreamPart {
                cid: 279786,
                page: 1,
                part: "intro".into(),
                duration: 61,
            }]
        );
    }

    #[test]
    fn test_error_envelope_without_data() {
        let envelope: PagelistEnvelope =
            serde_json::from_str(r#"{"code": -400, "message": "x"}"#).unwrap();
        assert_eq!(envelope.code, -400);
        assert_eq!(envelope.message, "x");
        assert!(envelope.data.is_none());

        let envelope: PagelistEnvelope =
            serde_json::from_str(r#"{"code": -404, "message": "nothing", "ttl": 1, "data": null}"#)
                .unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_missing_code_is_zero() {
        let envelope: PagelistEnvelope = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.data, Some(Vec::new()));
    }

    #[test]
    fn test_envelope_rejects_non_objects() {
        assert!(serde_json::from_str::<PagelistEnvelope>("<html>").is_err());
        assert!(serde_json::from_str::<PagelistEnvelope>("[]").is_err());
        assert!(serde_json::from_str::<PagelistEnvelope>(r#"{"code": "0"}"#).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = UpstreamError::Application {
            code: -400,
            message: "bad request".into(),
        };
        assert_eq!(
            err.to_string(),
            "upstream application error: bad request (code: -400)"
        );

        let err = UpstreamError::Status { status: 412 };
        assert!(err.to_string().contains("412"));
        assert_eq!(err.kind(), "status");
    }
}
