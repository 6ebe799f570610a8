//! Endpoint Registry — declarative table of every API operation the client knows.
//!
//! The registry is the single source of truth for endpoint shape:
//! - Lookup by logical name (`"assets.list"`, `"news.feed"`)
//! - Construction-time validation of path templates against declared path params
//! - Loading from the built-in table, a YAML string, or a YAML file
//! - Browsing helpers (`list`, `describe`)
//!
//! A registry is immutable once built. Share it between clients with an `Arc`.

pub mod errors;
pub mod template;
pub mod types;

use std::collections::{HashMap, HashSet};
use std::path::Path;

pub use errors::RegistryError;
pub use types::{EndpointDescriptor, EndpointSpec, HttpMethod};

/// YAML source of the built-in Messari endpoints.
const BUILTIN_ENDPOINTS: &str = include_str!("endpoints.yaml");

// ─── EndpointRegistry ────────────────────────────────────────────────────────

/// Immutable mapping from endpoint name to descriptor.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, EndpointDescriptor>,
}

impl EndpointRegistry {
    /// Build a registry from descriptors, validating each one.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = EndpointDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut endpoints = HashMap::new();
        for desc in descriptors {
            validate_descriptor(&desc)?;
            if endpoints.contains_key(&desc.name) {
                return Err(RegistryError::DuplicateEndpoint { name: desc.name });
            }
            endpoints.insert(desc.name.clone(), desc);
        }

        tracing::debug!(endpoints = endpoints.len(), "built endpoint registry");
        Ok(Self { endpoints })
    }

    /// The built-in Messari endpoint table.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(BUILTIN_ENDPOINTS)
    }

    /// Parse a registry from YAML (`name → {method, path, ...}`).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let mapping: serde_yaml::Mapping =
            serde_yaml::from_str(yaml).map_err(|e| RegistryError::LoadFailed {
                reason: format!("failed to parse registry: {e}"),
            })?;

        let mut descriptors = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| RegistryError::LoadFailed {
                    reason: format!("endpoint name must be a string, got {key:?}"),
                })?
                .to_string();
            let spec: EndpointSpec =
                serde_yaml::from_value(value).map_err(|e| RegistryError::LoadFailed {
                    reason: format!("invalid entry '{name}': {e}"),
                })?;
            descriptors.push(EndpointDescriptor::from_spec(name, spec));
        }

        Self::from_descriptors(descriptors)
    }

    /// Read and parse a registry YAML file.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| RegistryError::LoadFailed {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Look up a descriptor by endpoint name.
    pub fn lookup(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.endpoints.contains_key(name)
    }

    /// Descriptors sorted by name, optionally restricted to a name prefix.
    pub fn list(&self, prefix: Option<&str>) -> Vec<&EndpointDescriptor> {
        let mut out: Vec<&EndpointDescriptor> = self
            .endpoints
            .values()
            .filter(|d| prefix.map_or(true, |p| d.name.starts_with(p)))
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Sorted endpoint names.
    pub fn names(&self) -> Vec<&str> {
        self.list(None).into_iter().map(|d| d.name.as_str()).collect()
    }

    /// Human-readable schema summary for one endpoint.
    pub fn describe(&self, name: &str) -> Option<String> {
        self.lookup(name).map(EndpointDescriptor::describe)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check that the template parses and its placeholders match `path_params`
/// one-to-one.
fn validate_descriptor(desc: &EndpointDescriptor) -> Result<(), RegistryError> {
    let mismatch = |reason: String| RegistryError::PathParamMismatch {
        endpoint: desc.name.clone(),
        template: desc.path_template.clone(),
        reason,
    };

    let found =
        template::placeholders(&desc.path_template).map_err(|reason| {
            RegistryError::InvalidTemplate {
                endpoint: desc.name.clone(),
                template: desc.path_template.clone(),
                reason,
            }
        })?;

    let mut seen = HashSet::new();
    for name in &found {
        if !seen.insert(*name) {
            return Err(mismatch(format!("placeholder '{{{name}}}' appears more than once")));
        }
    }

    let mut declared = HashSet::new();
    for param in &desc.path_params {
        if !declared.insert(param.as_str()) {
            return Err(mismatch(format!("path param '{param}' declared twice")));
        }
        if !seen.contains(param.as_str()) {
            return Err(mismatch(format!("path param '{param}' has no placeholder")));
        }
    }

    if let Some(name) = found.iter().find(|n| !declared.contains(*n)) {
        return Err(mismatch(format!("placeholder '{{{name}}}' is not a declared path param")));
    }

    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
