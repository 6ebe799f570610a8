//! Registry error types.

use thiserror::Error;

/// Errors raised while building an endpoint registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors share the same name.
    #[error("duplicate endpoint name: '{name}'")]
    DuplicateEndpoint { name: String },

    /// The path template is not well formed (unbalanced or empty braces).
    #[error("invalid path template for '{endpoint}' ({template}): {reason}")]
    InvalidTemplate {
        endpoint: String,
        template: String,
        reason: String,
    },

    /// Placeholders and declared path parameters disagree.
    #[error("path params mismatch for '{endpoint}' ({template}): {reason}")]
    PathParamMismatch {
        endpoint: String,
        template: String,
        reason: String,
    },

    /// Registry source could not be read or parsed.
    #[error("failed to load registry: {reason}")]
    LoadFailed { reason: String },
}
