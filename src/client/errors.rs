//! Client error taxonomy.
//!
//! Every failure a caller can branch on. HTTP-level variants carry the status,
//! the raw message, a best-effort decoded body and the request URL.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::registry::RegistryError;
use crate::transport::TransportError;

/// Errors returned by [`MessariClient`](super::MessariClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Construction-time configuration problem (missing API key, bad config file).
    #[error("config error: {reason}")]
    Config { reason: String },

    /// The endpoint name is not in the registry.
    #[error("unknown endpoint: '{name}'")]
    UnknownEndpoint { name: String },

    /// A path placeholder had no value.
    #[error("missing path param '{name}' for {endpoint} (path template: {template})")]
    MissingPathParam {
        endpoint: String,
        name: String,
        template: String,
    },

    /// A caller-supplied parameter has an unusable value.
    #[error("invalid value for param '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// HTTP 401 or 403.
    #[error("[{status}] {message}")]
    Auth {
        status: u16,
        message: String,
        body: Option<Value>,
        url: String,
    },

    /// HTTP 429.
    #[error("[{status}] {message}")]
    RateLimit {
        status: u16,
        message: String,
        body: Option<Value>,
        url: String,
    },

    /// Any other non-2xx status.
    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
        url: String,
    },

    /// The transport did not finish within the configured timeout.
    #[error("request to {url} timed out after {}ms", timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// Connection-level failure before a response arrived.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// 2xx status but the body was not valid JSON.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl ClientError {
    /// Attach the request URL to a transport failure.
    pub(crate) fn from_transport(err: TransportError, url: &str) -> Self {
        match err {
            TransportError::Timeout { after } => ClientError::Timeout {
                url: url.to_string(),
                timeout: after,
            },
            TransportError::Connection { reason } => ClientError::Transport {
                url: url.to_string(),
                reason,
            },
        }
    }

    /// HTTP status for status-classified errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth { status, .. }
            | ClientError::RateLimit { status, .. }
            | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Request URL, when a request was attempted.
    pub fn url(&self) -> Option<&str> {
        match self {
            ClientError::Auth { url, .. }
            | ClientError::RateLimit { url, .. }
            | ClientError::Api { url, .. }
            | ClientError::Timeout { url, .. }
            | ClientError::Transport { url, .. }
            | ClientError::MalformedResponse { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Decoded error payload, if the server sent valid JSON.
    pub fn error_body(&self) -> Option<&Value> {
        match self {
            ClientError::Auth { body, .. }
            | ClientError::RateLimit { body, .. }
            | ClientError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ClientError::RateLimit { .. })
    }
}

impl From<RegistryError> for ClientError {
    fn from(e: RegistryError) -> Self {
        ClientError::Config {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_matches_status_format() {
        let err = ClientError::RateLimit {
            status: 429,
            message: "slow down".into(),
            body: None,
            url: "https://api.example.com/x".into(),
        };
        assert_eq!(err.to_string(), "[429] slow down");
    }

    #[test]
    fn test_accessors_on_http_error() {
        let err = ClientError::Auth {
            status: 401,
            message: "nope".into(),
            body: Some(json!({"error": "bad key"})),
            url: "https://api.example.com/x".into(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.url(), Some("https://api.example.com/x"));
        assert_eq!(err.error_body().unwrap()["error"], "bad key");
        assert!(err.is_auth());
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_accessors_on_pre_network_error() {
        let err = ClientError::UnknownEndpoint { name: "x".into() };
        assert_eq!(err.status(), None);
        assert_eq!(err.url(), None);
        assert!(err.error_body().is_none());
    }

    #[test]
    fn test_from_transport_timeout() {
        let err = ClientError::from_transport(
            TransportError::Timeout {
                after: Duration::from_secs(15),
            },
            "https://api.example.com/x",
        );
        match err {
            ClientError::Timeout { url, timeout } => {
                assert_eq!(url, "https://api.example.com/x");
                assert_eq!(timeout, Duration::from_secs(15));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_from_registry_error_is_config() {
        let err: ClientError = RegistryError::LoadFailed {
            reason: "boom".into(),
        }
        .into();
        assert!(matches!(err, ClientError::Config { .. }));
    }
}
