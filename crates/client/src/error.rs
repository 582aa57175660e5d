//! Error types for the management-plane client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during management-plane client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Session expired and could not be renewed.
    #[error("Session expired, please re-authenticate")]
    SessionExpired,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from the management plane.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Invalid response format from the management plane.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Inventory lookup did not resolve to an object.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The management plane reported failure for a submitted task.
    #[error("{description} failed on '{target}': {detail}")]
    TaskFailed {
        description: String,
        target: String,
        detail: String,
    },

    /// No terminal task state was observed within the maximum wait duration.
    #[error("{description} on '{target}' did not complete within {waited:?}")]
    TaskTimedOut {
        description: String,
        target: String,
        waited: Duration,
    },

    /// The management plane reported a task state outside the known state
    /// machine. Surfaced instead of looping forever on it.
    #[error("{description} on '{target}' reported unsupported task state '{state}'")]
    UnknownTaskState {
        description: String,
        target: String,
        state: String,
    },

    /// Watcher invoked with an invalid poll interval.
    #[error("Invalid watcher configuration: poll interval must be greater than zero")]
    InvalidPollInterval,

    /// The operation was cancelled before reaching a terminal state.
    #[error("Cancelled while waiting for {0}")]
    Cancelled(String),

    /// TLS/SSL error.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Certificate thumbprint did not have the expected shape.
    #[error("Thumbprint for '{host}' has {pairs} byte-pairs, expected {expected}")]
    InvalidThumbprint {
        host: String,
        pairs: usize,
        expected: usize,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),
}

impl ClientError {
    /// Check if this error is retryable at the HTTP layer.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::MaxRetriesExceeded(_))
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable: 429 (throttled) and transient gateway errors 502/503/504.
    /// Client errors and 500 fail immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::SessionExpired | Self::ApiError { status: 401, .. }
        )
    }
}
