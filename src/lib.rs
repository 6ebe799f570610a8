//! messari-sdk — registry-driven client for the Messari REST API.
//!
//! Endpoints are data, not code: each logical name (`"assets.list"`,
//! `"news.feed"`) maps to a descriptor with its method, path template and
//! allowed parameters. The client resolves caller parameters against the
//! descriptor, sends the request and classifies the response.
//!
//! ```ignore
//! use messari_sdk::{CallParams, MessariClient};
//!
//! let client = MessariClient::from_env()?;
//! let data = client
//!     .call("news.feed", &CallParams::new().query_param("limit", 50))
//!     .await?;
//! println!("{}", MessariClient::pretty(&data.unwrap_or_default()));
//! ```

pub mod client;
pub mod registry;
pub mod transport;

pub use client::{
    pretty, CallParams, ClientBuilder, ClientConfig, ClientError, MessariClient, PageOptions,
    RawResponse,
};
pub use registry::{EndpointDescriptor, EndpointRegistry, HttpMethod, RegistryError};
pub use transport::{HttpTransport, Transport, TransportError, TransportRequest, TransportResponse};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "messari_sdk=info,warn";

/// Install a human-readable tracing subscriber writing to stderr.
///
/// Honors `RUST_LOG`; falls back to `messari_sdk=info,warn`. Returns `false`
/// if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .try_init()
        .is_ok()
}

/// Install a JSON-lines tracing subscriber writing to stderr.
pub fn init_tracing_json() -> bool {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
