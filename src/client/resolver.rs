//! Parameter Resolver — descriptor + caller values → concrete path and query.
//!
//! Pure functions over borrowed inputs; the caller's maps are never mutated.

use serde_json::{Map, Value};

use super::errors::ClientError;
use crate::registry::template::{parse_template, Segment};
use crate::registry::EndpointDescriptor;

/// Path and query after substitution, filtering and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub path: String,
    pub query: Map<String, Value>,
}

/// Substitute path placeholders and filter the query for `desc`.
pub fn resolve(
    desc: &EndpointDescriptor,
    path_params: &Map<String, Value>,
    query_params: &Map<String, Value>,
) -> Result<ResolvedCall, ClientError> {
    Ok(ResolvedCall {
        path: substitute_path(desc, path_params)?,
        query: filter_query(desc, query_params),
    })
}

/// Replace every `{name}` in the template with the caller's value.
///
/// Absent or `null` values fail with `MissingPathParam`. Values that match no
/// placeholder are ignored.
pub fn substitute_path(
    desc: &EndpointDescriptor,
    path_params: &Map<String, Value>,
) -> Result<String, ClientError> {
    let segments = parse_template(&desc.path_template).map_err(|reason| ClientError::Config {
        reason: format!(
            "invalid path template for {} ({}): {reason}",
            desc.name, desc.path_template
        ),
    })?;

    let mut path = String::with_capacity(desc.path_template.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Placeholder(name) => {
                let value = path_params
                    .get(name)
                    .and_then(path_value_text)
                    .ok_or_else(|| ClientError::MissingPathParam {
                        endpoint: desc.name.clone(),
                        name: name.to_string(),
                        template: desc.path_template.clone(),
                    })?;
                path.push_str(&value);
            }
        }
    }

    Ok(path)
}

fn path_value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Drop `null` values, apply the allow-list, then normalize.
///
/// An empty allow-list on the descriptor keeps every key.
pub fn filter_query(desc: &EndpointDescriptor, query: &Map<String, Value>) -> Map<String, Value> {
    query
        .iter()
        .filter(|(_, v)| !v.is_null())
        .filter(|(k, _)| desc.allows_query_key(k))
        .map(|(k, v)| (k.clone(), normalize_query_value(v)))
        .collect()
}

/// Booleans become `"true"`/`"false"`; everything else is left alone.
pub fn normalize_query_value(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::String(if *b { "true" } else { "false" }.to_string()),
        other => other.clone(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
