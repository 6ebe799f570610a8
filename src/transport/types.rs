//! Transport request/response shapes and errors.

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::registry::HttpMethod;

/// A fully resolved request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Final header set, in send order.
    pub headers: Vec<(String, String)>,
    /// Filtered and normalized query parameters.
    pub query: Map<String, Value>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the wire, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub content_length: Option<u64>,
}

impl TransportResponse {
    /// Response with a status and text body, no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            status,
            headers: Vec::new(),
            content_length: Some(body.len() as u64),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Failures below the HTTP layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The exchange did not complete within the configured timeout.
    #[error("request timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },

    /// Connection, TLS or I/O failure.
    #[error("connection failed: {reason}")]
    Connection { reason: String },
}
