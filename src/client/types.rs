//! Caller-facing request/response types.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::ClientError;

// ─── CallParams ──────────────────────────────────────────────────────────────

/// Per-call inputs: path values, query values, JSON body and extra headers.
///
/// ```ignore
/// let params = CallParams::new()
///     .path_param("exchangeIdentifier", "binance")
///     .query_param("limit", 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallParams {
    pub path: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl CallParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.path.insert(name.to_string(), value.into());
        self
    }

    pub fn query_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.query.insert(name.to_string(), value.into());
        self
    }

    /// Merge key/value pairs into the query.
    ///
    /// Accepts a `serde_json::Map` as well as arrays or iterators of pairs.
    pub fn query<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.query
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Merge key/value pairs into the path values.
    pub fn path<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.path
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Extra header; overrides a base header with the same name.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

// ─── PageOptions ─────────────────────────────────────────────────────────────

/// Bounds for [`MessariClient::paged_call`](super::MessariClient::paged_call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Query parameter carrying the page index.
    pub page_param: String,
    /// Exact number of requests issued.
    pub max_pages: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            max_pages: 5,
        }
    }
}

impl PageOptions {
    pub fn new(page_param: &str, max_pages: u32) -> Self {
        Self {
            page_param: page_param.to_string(),
            max_pages,
        }
    }
}

// ─── RawResponse ─────────────────────────────────────────────────────────────

/// A status-checked response returned without decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub content_length: Option<u64>,
}

impl RawResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::MalformedResponse {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}
