//! Error types for the translation pipeline.
//!
//! Every failure is tagged with its origin where it is raised (backend call,
//! parse step, timeout, shape check), so classification never has to guess
//! from message text. `detect_error_type` remains for errors that arrive from
//! outside this crate as plain messages.

use crate::retry::AttemptTimeout;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// User-facing classification of a failed translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NetworkError,
    ApiKeyMissing,
    ApiKeyInvalid,
    Timeout,
    RateLimit,
    Unknown,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::NetworkError,
        ErrorKind::ApiKeyMissing,
        ErrorKind::ApiKeyInvalid,
        ErrorKind::Timeout,
        ErrorKind::RateLimit,
        ErrorKind::Unknown,
    ];
}

/// Errors raised while translating a content section.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("API key not found: OPENAI_API_KEY is missing")]
    MissingApiKey,

    #[error("API key rejected by backend ({status}): {body}")]
    InvalidApiKey { status: u16, body: String },

    #[error("rate limit exceeded ({status}): {body}")]
    RateLimited { status: u16, body: String },

    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("no translation returned")]
    EmptyResponse,

    #[error("failed to parse translated JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("translated content changed shape at {path}: {detail}")]
    ShapeMismatch { path: String, detail: String },
}

impl TranslationError {
    /// Structured classification, decided by where the error came from.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslationError::MissingApiKey => ErrorKind::ApiKeyMissing,
            TranslationError::InvalidApiKey { .. } => ErrorKind::ApiKeyInvalid,
            TranslationError::RateLimited { .. } => ErrorKind::RateLimit,
            TranslationError::Network(_) => ErrorKind::NetworkError,
            TranslationError::Timeout(_) => ErrorKind::Timeout,
            TranslationError::Http { .. }
            | TranslationError::EmptyResponse
            | TranslationError::Parse(_)
            | TranslationError::ShapeMismatch { .. } => ErrorKind::Unknown,
        }
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// Key problems and HTTP 400/401/403/404 fail fast; everything else
    /// (5xx, 429, network, timeouts, malformed model output) is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::MissingApiKey | TranslationError::InvalidApiKey { .. } => false,
            TranslationError::Http { status, .. } => !matches!(status, 400 | 401 | 403 | 404),
            _ => true,
        }
    }

    /// Map a reqwest transport failure to a tagged error.
    pub fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            TranslationError::Timeout(timeout)
        } else {
            TranslationError::Network(error.to_string())
        }
    }

    /// Map a non-success HTTP status to a tagged error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => TranslationError::InvalidApiKey { status, body },
            429 => TranslationError::RateLimited { status, body },
            _ => TranslationError::Http { status, body },
        }
    }
}

impl From<AttemptTimeout> for TranslationError {
    fn from(timeout: AttemptTimeout) -> Self {
        TranslationError::Timeout(timeout.0)
    }
}

/// Classify an error that only exists as a message (first match wins).
///
/// Errors raised in this crate carry their kind already; this is for foreign
/// failures such as a background task's `JoinError`.
pub fn detect_error_type(message: &str) -> ErrorKind {
    let message = message.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if has(&["api key", "api_key"]) {
        if has(&["not found", "missing"]) {
            ErrorKind::ApiKeyMissing
        } else {
            ErrorKind::ApiKeyInvalid
        }
    } else if has(&["timeout", "timed out"]) {
        ErrorKind::Timeout
    } else if has(&["rate limit", "too many"]) {
        ErrorKind::RateLimit
    } else if has(&["network", "fetch", "connection"]) {
        ErrorKind::NetworkError
    } else {
        ErrorKind::Unknown
    }
}
