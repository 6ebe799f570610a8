//! Client configuration loading and validation.
//!
//! A `ClientConfig` can be built in code or read from `messari.yaml`. String
//! values in the file may reference environment variables as `${VAR}` or
//! `${VAR:-default}`, so the API key never has to be written to disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::errors::ClientError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.messari.io";

/// Per-call timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable consulted when no API key is given explicitly.
pub const DEFAULT_API_KEY_ENV: &str = "MESSARI_API_KEY";

/// Environment variable pointing directly at a config file.
pub const CONFIG_PATH_ENV: &str = "MESSARI_SDK_CONFIG";

const CONFIG_FILE_NAME: &str = "messari.yaml";

// ─── ClientConfig ────────────────────────────────────────────────────────────

/// Process-scoped client settings (mirrors `messari.yaml`).
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Explicit API key. When absent, `api_key_env` is read at build time.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

// The key is a credential; keep it out of logs and panics.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with trailing slashes removed.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// The explicit key if non-empty, else the value of `api_key_env`.
    ///
    /// Only empty or absent keys are rejected; the key is otherwise passed
    /// through untouched.
    pub fn resolve_api_key(&self) -> Result<String, ClientError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }

        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ClientError::Config {
                reason: format!(
                    "API key is missing. Either pass api_key explicitly or set the {} \
                     environment variable.",
                    self.api_key_env
                ),
            }),
        }
    }

    /// Reject values that cannot produce a working client.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.timeout_secs == 0 {
            return Err(ClientError::Config {
                reason: "timeout_secs must be greater than zero".into(),
            });
        }
        let base = self.normalized_base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config {
                reason: format!("base_url must start with http:// or https://, got '{base}'"),
            });
        }
        Ok(())
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Locate `messari.yaml`.
///
/// Order: the `MESSARI_SDK_CONFIG` env var, then a walk upward from `start`,
/// then the platform config directory (`<config_dir>/messari/messari.yaml`).
pub fn find_config_path(start: &Path) -> Result<PathBuf, ClientError> {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
        let candidate = expand_tilde(&explicit);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }
        if !dir.pop() {
            break;
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("messari").join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ClientError::Config {
        reason: format!("could not find {CONFIG_FILE_NAME}"),
    })
}

/// Load and parse a client config file, interpolating `${VAR}` references.
pub fn load_client_config(path: &Path) -> Result<ClientConfig, ClientError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
        reason: format!("failed to read {}: {e}", path.display()),
    })?;

    let interpolated = interpolate_env_vars(&raw)?;

    let config: ClientConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ClientError::Config {
            reason: format!("failed to parse config: {e}"),
        })?;

    tracing::debug!(
        path = %path.display(),
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "loaded client config"
    );

    Ok(config)
}

// ─── Env-var interpolation ───────────────────────────────────────────────────

/// Substitute `${VAR}` and `${VAR:-default}` references in the raw file text.
///
/// A reference to an unset variable with no default is an error, so a missing
/// key is reported at load time instead of being sent as an empty header.
fn interpolate_env_vars(input: &str) -> Result<String, ClientError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            return Err(ClientError::Config {
                reason: format!("unterminated variable reference '{}'", &rest[open..]),
            });
        };
        out.push_str(&env_value(&after[..close])?);
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn env_value(expr: &str) -> Result<String, ClientError> {
    let (name, default) = match expr.split_once(":-") {
        Some((name, default)) => (name.trim(), Some(default)),
        None => (expr.trim(), None),
    };
    if name.is_empty() {
        return Err(ClientError::Config {
            reason: format!("empty variable name in '${{{expr}}}'"),
        });
    }

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_string()),
        (Err(_), None) => Err(ClientError::Config {
            reason: format!("environment variable {name} is not set and has no default"),
        }),
    }
}

/// `~/x` relative to the home directory; anything else as given.
fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
