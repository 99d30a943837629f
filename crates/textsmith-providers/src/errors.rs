//! Mapping of HTTP failures onto the shared [`ErrorKind`] taxonomy.

use serde_json::Value;

use textsmith_core::error::{detail, DispatchError, ErrorKind};

/// Who failed, for error messages.
#[derive(Clone, Copy, Debug)]
pub struct ProviderId {
    pub tag: &'static str,
    pub name: &'static str,
}

/// Signature shared by the default mapping and provider-specific ones.
pub type Classifier = fn(&ProviderId, u16, &str) -> DispatchError;

/// Best human-readable message from an error body: `error.message`,
/// `message`, `error` (when a string), else the raw text.
pub fn server_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
            .or_else(|| v.get("message"))
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    from_json.unwrap_or_else(|| body.to_string())
}

/// Default status mapping used by every adapter.
pub fn classify_status(id: &ProviderId, status: u16, body: &str) -> DispatchError {
    let message = server_message(body);
    let lower = message.to_ascii_lowercase();
    let name = id.name;

    let (kind, text) = match status {
        429 if lower.contains("quota") => (
            ErrorKind::RateLimited,
            format!("{name} quota exhausted. Check your plan or billing settings."),
        ),
        429 if lower.contains("rate_limit") => (
            ErrorKind::RateLimited,
            "Too many requests. Wait 20-30 seconds and try again.".to_string(),
        ),
        429 => (
            ErrorKind::RateLimited,
            format!("{name} rate limit exceeded. Wait a minute and try again."),
        ),
        401 => (
            ErrorKind::InvalidCredential,
            format!("{name} API key is invalid. Create a new key and save it again."),
        ),
        403 => (
            ErrorKind::AccessDenied,
            format!("{name} API access denied. Make sure your API key is active."),
        ),
        400 if lower.contains("model") => (
            ErrorKind::BadRequest,
            format!("The selected {name} model is unavailable. Try a different model."),
        ),
        400 if lower.contains("max_tokens") => (
            ErrorKind::BadRequest,
            "Text is too long. Select a shorter text and try again.".to_string(),
        ),
        400 => (
            ErrorKind::BadRequest,
            "Invalid request. Check the text length and try again.".to_string(),
        ),
        404 => (
            ErrorKind::Misconfigured,
            format!("{name} endpoint not found. Check the endpoint URL."),
        ),
        500 | 502 | 503 => (
            ErrorKind::ServiceUnavailable,
            format!("{name} is currently unavailable. Try again in 5-10 minutes."),
        ),
        529 => (
            ErrorKind::ServiceUnavailable,
            format!("{name} is overloaded. Try again in a few minutes."),
        ),
        504 => (
            ErrorKind::GatewayTimeout,
            format!("{name} did not respond in time. Please try again."),
        ),
        s if s >= 500 => (
            ErrorKind::ServiceUnavailable,
            format!("{name} API error ({s}): {}", detail(&message)),
        ),
        s => (
            ErrorKind::BadRequest,
            format!("{name} API error ({s}): {}", detail(&message)),
        ),
    };
    DispatchError::new(kind, id.tag, text)
}

/// Transport-level failure (no HTTP status).
///
/// The URL is stripped before formatting; Gemini carries the key in the
/// query string.
pub fn classify_transport(id: &ProviderId, err: reqwest::Error) -> DispatchError {
    let err = err.without_url();
    if err.is_timeout() {
        DispatchError::new(
            ErrorKind::GatewayTimeout,
            id.tag,
            format!("{} request timed out. Your connection may be slow.", id.name),
        )
    } else if err.is_connect() {
        DispatchError::new(
            ErrorKind::NetworkFailure,
            id.tag,
            format!("Cannot reach {}. Check your internet connection.", id.name),
        )
    } else {
        DispatchError::new(
            ErrorKind::NetworkFailure,
            id.tag,
            format!("{} request failed: {}", id.name, detail(&err.to_string())),
        )
    }
}

/// Parse a success body, or report an unexpected shape.
pub fn json_body(id: &ProviderId, body: &str) -> Result<Value, DispatchError> {
    serde_json::from_str(body).map_err(|_| DispatchError::unexpected_shape(id.tag))
}

/// First non-empty string at any of `pointers`, trimmed.
pub fn extract_text(value: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|p| {
        value
            .pointer(p)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
