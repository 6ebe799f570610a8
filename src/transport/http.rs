//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

use super::types::{TransportError, TransportRequest, TransportResponse};
use super::{query_pairs, Transport};
use crate::registry::HttpMethod;

/// TCP connection timeout. The per-call timeout comes from the request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// ─── HttpTransport ───────────────────────────────────────────────────────────

/// Transport over a pooled `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: ReqwestClient,
}

impl HttpTransport {
    /// Create a transport with its own connection pool.
    pub fn new() -> Result<Self, TransportError> {
        let http = ReqwestClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Connection {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http })
    }

    /// Wrap an existing, possibly shared, reqwest client.
    pub fn with_client(http: ReqwestClient) -> Self {
        Self { http }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn map_reqwest_error(e: reqwest::Error, timeout: Duration) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout { after: timeout }
    } else {
        TransportError::Connection {
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let pairs = query_pairs(&request.query);
        if !pairs.is_empty() {
            builder = builder.query(&pairs);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, request.timeout))?;

        let status = response.status().as_u16();
        let content_length = response.content_length();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, request.timeout))?;

        Ok(TransportResponse {
            status,
            headers,
            body,
            content_length,
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
