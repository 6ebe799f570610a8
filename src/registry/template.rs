//! Path template parsing.
//!
//! Templates look like `/metrics/v1/exchanges/{exchangeIdentifier}`. A
//! placeholder is a non-empty name between `{` and `}`; braces do not nest.

/// A piece of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split a template into literal and placeholder segments.
///
/// Returns a reason string when a brace is unbalanced or a placeholder is empty.
pub fn parse_template(template: &str) -> Result<Vec<Segment<'_>>, String> {
    let mut segments = Vec::new();
    let mut rest = template;

    while !rest.is_empty() {
        match rest.find(['{', '}']) {
            None => {
                segments.push(Segment::Literal(rest));
                break;
            }
            Some(idx) if rest.as_bytes()[idx] == b'}' => {
                let offset = template.len() - rest.len() + idx;
                return Err(format!("unmatched '}}' at offset {offset}"));
            }
            Some(idx) => {
                if idx > 0 {
                    segments.push(Segment::Literal(&rest[..idx]));
                }
                let after = &rest[idx + 1..];
                let close = after
                    .find(['{', '}'])
                    .filter(|&c| after.as_bytes()[c] == b'}')
                    .ok_or_else(|| "unclosed '{'".to_string())?;
                let name = &after[..close];
                if name.is_empty() {
                    return Err("empty placeholder '{}'".into());
                }
                segments.push(Segment::Placeholder(name));
                rest = &after[close + 1..];
            }
        }
    }

    Ok(segments)
}

/// Placeholder names in template order (duplicates preserved).
pub fn placeholders(template: &str) -> Result<Vec<&str>, String> {
    Ok(parse_template(template)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
