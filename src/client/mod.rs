//! Messari client — dispatch engine over the endpoint registry.
//!
//! This module handles:
//! - Client construction and configuration (API key, base URL, timeout)
//! - Parameter resolution: path substitution, query allow-listing, normalization
//! - Request dispatch through a pluggable [`Transport`](crate::transport::Transport)
//! - Response classification into payloads or typed errors
//! - Fixed-bound paging and pretty-printing helpers

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod resolver;
pub mod types;

pub use classify::classify;
pub use config::{find_config_path, load_client_config, ClientConfig};
pub use dispatch::{pretty, ClientBuilder, MessariClient, API_KEY_HEADER, DEFAULT_PRETTY_MAX_LEN};
pub use errors::ClientError;
pub use resolver::{resolve, ResolvedCall};
pub use types::{CallParams, PageOptions, RawResponse};
