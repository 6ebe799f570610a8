//! Transport — the seam between the dispatcher and the network.
//!
//! The dispatcher never opens sockets. It shapes a [`TransportRequest`] and
//! hands it to a [`Transport`]. [`HttpTransport`] is the reqwest-backed
//! implementation; tests plug in stubs.

pub mod http;
pub mod types;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use http::HttpTransport;
pub use types::{TransportError, TransportRequest, TransportResponse};

/// Performs one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}

// ─── Query Serialization ─────────────────────────────────────────────────────

/// Flatten query values into `(key, value)` string pairs.
///
/// Strings go through verbatim, arrays become repeated keys, and numbers and
/// objects are written as JSON text. `null` entries are skipped.
pub fn query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
