//! Request Dispatcher — the registry-driven Messari client.
//!
//! `call("news.feed", &params)` looks the endpoint up, resolves path and query
//! values against its descriptor, sends the request through the transport and
//! classifies the response. Nothing is cached or retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::classify::{classify, decode_payload};
use super::config::ClientConfig;
use super::errors::ClientError;
use super::resolver::resolve;
use super::types::{CallParams, PageOptions, RawResponse};
use crate::registry::{EndpointDescriptor, EndpointRegistry};
use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-messari-api-key";

/// Default character limit for [`pretty`].
pub const DEFAULT_PRETTY_MAX_LEN: usize = 3000;

// ─── MessariClient ───────────────────────────────────────────────────────────

/// Registry-driven client for the Messari REST API.
///
/// Holds only immutable state; clones share the registry and transport.
#[derive(Clone)]
pub struct MessariClient {
    registry: Arc<EndpointRegistry>,
    transport: Arc<dyn Transport>,
    base_url: String,
    timeout: Duration,
    base_headers: Vec<(String, String)>,
}

impl fmt::Debug for MessariClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessariClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("endpoints", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl MessariClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client from an explicit config, built-in registry and HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::builder().config(config).build()
    }

    /// Client with default settings and the key from `MESSARI_API_KEY`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ─── Calls ───────────────────────────────────────────────────────────

    /// Call an endpoint and decode the JSON payload.
    ///
    /// Returns `Ok(None)` when the server answers 2xx with an empty body.
    pub async fn call(&self, name: &str, params: &CallParams) -> Result<Option<Value>, ClientError> {
        let (request, response) = self.execute(name, params).await?;
        decode_payload(&response.body, &request.url)
    }

    /// Call an endpoint and return the status-checked response undecoded.
    pub async fn call_raw(&self, name: &str, params: &CallParams) -> Result<RawResponse, ClientError> {
        let (request, response) = self.execute(name, params).await?;
        Ok(RawResponse {
            status: response.status,
            url: request.url,
            headers: response.headers,
            body: response.body,
            content_length: response.content_length,
        })
    }

    /// Fetch `max_pages` consecutive pages, one request per page.
    ///
    /// The first page is the caller's value for `page_param` (0 when absent).
    /// There is no end-of-data detection; stop early by choosing `max_pages`.
    /// The first failing page aborts the whole sequence.
    pub async fn paged_call(
        &self,
        name: &str,
        params: &CallParams,
        options: &PageOptions,
    ) -> Result<Vec<Option<Value>>, ClientError> {
        self.lookup(name)?;
        let start = start_page(params.query.get(&options.page_param), &options.page_param)?;
        if options.max_pages > 0 && start.checked_add(i64::from(options.max_pages - 1)).is_none() {
            return Err(ClientError::InvalidParam {
                name: options.page_param.clone(),
                reason: format!(
                    "page index overflow: {start} + {} pages exceeds i64::MAX",
                    options.max_pages
                ),
            });
        }

        let mut page_params = params.clone();
        let mut results = Vec::with_capacity(options.max_pages as usize);
        for offset in 0..options.max_pages {
            // Range checked above.
            let page = start + i64::from(offset);
            page_params
                .query
                .insert(options.page_param.clone(), Value::from(page));
            tracing::debug!(endpoint = name, page, "fetching page");
            results.push(self.call(name, &page_params).await?);
        }

        Ok(results)
    }

    /// Build the request `call` would send, without sending it.
    pub fn prepare(&self, name: &str, params: &CallParams) -> Result<TransportRequest, ClientError> {
        let desc = self.lookup(name)?;
        let resolved = resolve(desc, &params.path, &params.query)?;

        let body = match (&params.body, desc.method.allows_body()) {
            (Some(body), true) => Some(body.clone()),
            (Some(_), false) => {
                tracing::debug!(
                    endpoint = name,
                    method = %desc.method,
                    "ignoring body for body-less method"
                );
                None
            }
            (None, _) => None,
        };

        Ok(TransportRequest {
            method: desc.method,
            url: format!("{}{}", self.base_url, resolved.path),
            headers: merge_headers(&self.base_headers, &params.headers),
            query: resolved.query,
            body,
            timeout: self.timeout,
        })
    }

    /// Pretty-print a payload, truncated to [`DEFAULT_PRETTY_MAX_LEN`] characters.
    pub fn pretty(payload: &Value) -> String {
        pretty(payload, DEFAULT_PRETTY_MAX_LEN)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn lookup(&self, name: &str) -> Result<&EndpointDescriptor, ClientError> {
        self.registry
            .lookup(name)
            .ok_or_else(|| ClientError::UnknownEndpoint {
                name: name.to_string(),
            })
    }

    async fn execute(
        &self,
        name: &str,
        params: &CallParams,
    ) -> Result<(TransportRequest, TransportResponse), ClientError> {
        let request = self.prepare(name, params)?;

        tracing::debug!(
            endpoint = name,
            method = %request.method,
            url = %request.url,
            query_params = request.query.len(),
            has_body = request.body.is_some(),
            "dispatching request"
        );

        let response = match tokio::time::timeout(self.timeout, self.transport.send(&request)).await {
            Ok(result) => result.map_err(|e| ClientError::from_transport(e, &request.url))?,
            Err(_) => {
                return Err(ClientError::Timeout {
                    url: request.url.clone(),
                    timeout: self.timeout,
                })
            }
        };

        if let Err(err) = classify(response.status, &response.body, &request.url) {
            tracing::warn!(
                endpoint = name,
                status = response.status,
                url = %request.url,
                "request failed: {err}"
            );
            return Err(err);
        }

        tracing::debug!(
            endpoint = name,
            status = response.status,
            content_length = ?response.content_length,
            "request succeeded"
        );

        Ok((request, response))
    }
}

/// Base headers overlaid by caller headers; names compare case-insensitively.
fn merge_headers(base: &[(String, String)], extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = base.to_vec();
    for (name, value) in extra {
        merged.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        merged.push((name.clone(), value.clone()));
    }
    merged
}

/// Starting page index from the caller's query value.
fn start_page(value: Option<&Value>, param: &str) -> Result<i64, ClientError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(0);
    };

    let page = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    page.ok_or_else(|| ClientError::InvalidParam {
        name: param.to_string(),
        reason: format!("page index must be an integer, got {value}"),
    })
}

/// Two-space indented JSON, cut to `max_len` characters.
pub fn pretty(payload: &Value, max_len: usize) -> String {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    if text.chars().count() <= max_len {
        return text;
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push_str("\n... (truncated)");
    cut
}

// ─── ClientBuilder ───────────────────────────────────────────────────────────

/// Builder for [`MessariClient`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
    registry: Option<Arc<EndpointRegistry>>,
}

impl ClientBuilder {
    /// Replace every config field at once.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.config.api_key = Some(key.to_string());
        self
    }

    /// Environment variable read when no explicit key is set.
    pub fn api_key_env(mut self, var: &str) -> Self {
        self.config.api_key_env = var.to_string();
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    /// Per-call timeout; overrides `timeout_secs` from the config.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share a transport (and its connection pool) between clients.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom registry instead of the built-in endpoint table.
    pub fn registry(mut self, registry: Arc<EndpointRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<MessariClient, ClientError> {
        self.config.validate()?;
        let timeout = self.timeout.unwrap_or_else(|| self.config.timeout());
        if timeout.is_zero() {
            return Err(ClientError::Config {
                reason: "timeout must be greater than zero".into(),
            });
        }

        let api_key = self.config.resolve_api_key()?;

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(EndpointRegistry::builtin()?),
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new().map_err(|e| ClientError::Config {
                reason: e.to_string(),
            })?),
        };

        let base_url = self.config.normalized_base_url();
        tracing::debug!(
            base_url = %base_url,
            timeout_ms = timeout.as_millis() as u64,
            endpoints = registry.len(),
            "built Messari client"
        );

        Ok(MessariClient {
            registry,
            transport,
            base_url,
            timeout,
            base_headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), api_key),
            ],
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
