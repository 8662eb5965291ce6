//! Error taxonomy for TestRail API calls.
//!
//! The transport classifies every failed HTTP outcome into an [`ApiError`].
//! Argument binding failures are detected locally, before any request is
//! sent, and are reported as [`ArgumentError`].

use thiserror::Error;

/// Failures produced by the HTTP transport.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        /// Seconds to wait, from the `Retry-After` header when present.
        retry_after: Option<u64>,
    },

    #[error("TestRail API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Stable machine-readable classification.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication",
            Self::RateLimit { .. } => "rate_limit",
            Self::Api { .. } => "api_error",
            Self::Connection(_) => "connection",
            Self::Decode(_) => "invalid_response",
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::RateLimit { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            Self::Connection(_) | Self::Decode(_) => None,
        }
    }
}

/// Arguments that could not be bound to an operation's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Missing required parameter(s): {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Unexpected parameter(s): {}", .0.join(", "))]
    Unexpected(Vec<String>),

    #[error("Parameter '{name}' must be {expected}, got {found}")]
    InvalidType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure of a bound operation invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A resource module whose operation table could not be enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("Duplicate operation name: {0}")]
    DuplicateOperation(String),

    #[error("Operation {operation}: path placeholder {{{placeholder}}} has no path parameter")]
    UnboundPlaceholder {
        operation: String,
        placeholder: String,
    },

    #[error("Operation {operation}: path parameter {parameter} missing from path template")]
    UnusedPathParameter {
        operation: String,
        parameter: String,
    },
}

/// Pull a human-readable message out of a TestRail error body.
///
/// TestRail reports failures as `{"error": "..."}`; anything else falls back
/// to the raw body, or the supplied default when the body is empty.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        })
}
