//! Endpoint descriptor types.
//!
//! These mirror the YAML registry format: a mapping of endpoint name to
//! `{method, path, path_params, query_params, body_params, description}`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── HttpMethod ──────────────────────────────────────────────────────────────

/// HTTP method an endpoint is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Canonical upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a JSON body is attached when the caller supplies one.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── EndpointSpec ────────────────────────────────────────────────────────────

/// One registry entry as written in the YAML source (name is the map key).
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSpec {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub path_params: Vec<String>,
    #[serde(default)]
    pub query_params: Vec<String>,
    #[serde(default)]
    pub body_params: Vec<String>,
    #[serde(default)]
    pub description: String,
}

// ─── EndpointDescriptor ──────────────────────────────────────────────────────

/// Declarative definition of one logical API operation.
///
/// An empty `query_params` list means the endpoint accepts any query key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub name: String,
    pub method: HttpMethod,
    pub path_template: String,
    pub path_params: Vec<String>,
    pub query_params: Vec<String>,
    pub body_params: Vec<String>,
    pub description: String,
}

impl EndpointDescriptor {
    /// Build a descriptor with no parameters. Use the `with_*` helpers to fill it in.
    pub fn new(name: &str, method: HttpMethod, path_template: &str) -> Self {
        Self {
            name: name.to_string(),
            method,
            path_template: path_template.to_string(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_path_params(mut self, params: &[&str]) -> Self {
        self.path_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_query_params(mut self, params: &[&str]) -> Self {
        self.query_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_body_params(mut self, params: &[&str]) -> Self {
        self.body_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub(crate) fn from_spec(name: String, spec: EndpointSpec) -> Self {
        Self {
            name,
            method: spec.method,
            path_template: spec.path,
            path_params: spec.path_params,
            query_params: spec.query_params,
            body_params: spec.body_params,
            description: spec.description,
        }
    }

    /// Whether any query key is accepted (empty allow-list).
    pub fn allows_any_query(&self) -> bool {
        self.query_params.is_empty()
    }

    /// Whether `key` passes the query allow-list.
    pub fn allows_query_key(&self, key: &str) -> bool {
        self.allows_any_query() || self.query_params.iter().any(|k| k == key)
    }

    /// Render a human-readable schema summary.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Endpoint: {}\n", self.name));
        out.push_str(&format!("Method : {}\n", self.method));
        out.push_str(&format!("Path   : {}\n", self.path_template));

        for (label, params) in [
            ("Path Params", &self.path_params),
            ("Query Params", &self.query_params),
            ("Body Params", &self.body_params),
        ] {
            out.push('\n');
            if params.is_empty() {
                out.push_str(&format!("{label}: (none)\n"));
            } else {
                out.push_str(&format!("{label}:\n"));
                for p in params {
                    out.push_str(&format!("  - {p}\n"));
                }
            }
        }

        if !self.description.is_empty() {
            out.push_str("\nDescription:\n");
            for line in self.description.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }

        out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
