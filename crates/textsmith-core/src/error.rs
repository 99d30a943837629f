//! Error taxonomy shared by adapters, the orchestrator and the facade.
//!
//! Adapters translate HTTP statuses and server messages into an [`ErrorKind`];
//! everything above them propagates the resulting [`DispatchError`] untouched.

use std::fmt;

use thiserror::Error;

/// Longest slice of raw server text embedded into an error message.
pub const MAX_DETAIL_CHARS: usize = 100;

/// What went wrong, independent of which provider reported it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RateLimited,
    InvalidCredential,
    AccessDenied,
    /// Rejected request, e.g. oversized input or blocked content.
    BadRequest,
    /// Transient outage. Retried only by adapters whose policy allows it.
    ServiceUnavailable,
    GatewayTimeout,
    UnexpectedResponseShape,
    /// Local setup problem, e.g. a custom provider without an endpoint.
    Misconfigured,
    NetworkFailure,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::InvalidCredential => "invalid_credential",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::GatewayTimeout => "gateway_timeout",
            ErrorKind::UnexpectedResponseShape => "unexpected_response_shape",
            ErrorKind::Misconfigured => "misconfigured",
            ErrorKind::NetworkFailure => "network_failure",
            ErrorKind::Cancelled => "cancelled",
        }
    }

    /// Whether the UI should offer a "fix your settings" action.
    pub fn needs_remediation(&self) -> bool {
        matches!(self, ErrorKind::InvalidCredential | ErrorKind::Misconfigured)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of one dispatch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{provider}: {message}")]
pub struct DispatchError {
    pub kind: ErrorKind,
    /// Provider tag (`"openai"`, `"free"`, …) that produced the failure.
    pub provider: String,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: ErrorKind, provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(provider: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, provider, "request was cancelled")
    }

    pub fn misconfigured(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Misconfigured, provider, message)
    }

    pub fn unexpected_shape(provider: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnexpectedResponseShape,
            provider,
            "unexpected response format from the API",
        )
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::ServiceUnavailable
    }
}

/// Cap raw server text before it is embedded in a message.
pub fn detail(raw: &str) -> String {
    raw.trim().chars().take(MAX_DETAIL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_provider_and_message() {
        let err = DispatchError::new(ErrorKind::RateLimited, "groq", "slow down");
        assert_eq!(err.to_string(), "groq: slow down");
    }

    #[test]
    fn test_detail_is_capped() {
        let long = "x".repeat(500);
        assert_eq!(detail(&long).chars().count(), MAX_DETAIL_CHARS);
        assert_eq!(detail("  short  "), "short");
    }

    #[test]
    fn test_detail_unicode_safe() {
        let long = "ğ".repeat(150);
        assert_eq!(detail(&long).chars().count(), MAX_DETAIL_CHARS);
    }

    #[test]
    fn test_remediation_kinds() {
        assert!(ErrorKind::InvalidCredential.needs_remediation());
        assert!(ErrorKind::Misconfigured.needs_remediation());
        assert!(!ErrorKind::RateLimited.needs_remediation());
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(DispatchError::new(ErrorKind::ServiceUnavailable, "free", "x").is_retryable());
        assert!(!DispatchError::new(ErrorKind::GatewayTimeout, "free", "x").is_retryable());
    }
}
