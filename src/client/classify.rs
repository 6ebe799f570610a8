//! Response classification: status code → success or typed error.

use serde_json::Value;

use super::errors::ClientError;

/// Map a status/body pair to `Ok` or the matching [`ClientError`].
///
/// 2xx is success; 401/403 are auth failures; 429 is rate limiting; anything
/// else is a generic API error. The body is decoded best-effort and a decode
/// failure never changes the classification.
pub fn classify(status: u16, body: &str, url: &str) -> Result<(), ClientError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let trimmed = body.trim();
    let message = if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    };
    let decoded = serde_json::from_str::<Value>(body).ok();
    let url = url.to_string();

    Err(match status {
        401 | 403 => ClientError::Auth {
            status,
            message,
            body: decoded,
            url,
        },
        429 => ClientError::RateLimit {
            status,
            message,
            body: decoded,
            url,
        },
        _ => ClientError::Api {
            status,
            message,
            body: decoded,
            url,
        },
    })
}

/// Decode a success body. Empty or whitespace-only bodies yield `None`.
pub fn decode_payload(body: &str, url: &str) -> Result<Option<Value>, ClientError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| ClientError::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
