//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error
//!   types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use virtmgr_client::ClientError;

/// Structured exit codes for virtmgr.
///
/// These codes let scripts distinguish failure modes and take appropriate
/// action (retry, refresh credentials, fail fast, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid credentials or expired session.
    AuthenticationFailed = 2,

    /// Network, TLS, or DNS failure; may be retried.
    ConnectionError = 3,

    /// Host/cluster lookup did not resolve to an object.
    NotFound = 4,

    /// Invalid parameters (bad poll interval, malformed response, bad URL).
    ValidationError = 5,

    /// The management plane reported failure for a submitted task.
    TaskFailed = 6,

    /// No terminal task state within the configured maximum wait.
    TaskTimedOut = 7,

    /// The management plane is throttling or unavailable; back off and retry.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl-C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::SessionExpired => {
                ExitCode::AuthenticationFailed
            }
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            ClientError::TlsError(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::NotFound(_) => ExitCode::NotFound,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::InvalidPollInterval
            | ClientError::InvalidResponse(_)
            | ClientError::InvalidThumbprint { .. } => ExitCode::ValidationError,
            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,

            ClientError::TaskFailed { .. } | ClientError::UnknownTaskState { .. } => {
                ExitCode::TaskFailed
            }
            ClientError::TaskTimedOut { .. } => ExitCode::TaskTimedOut,

            ClientError::ApiError {
                status: 429 | 502 | 503 | 504,
                ..
            } => ExitCode::ServiceUnavailable,
            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,

            ClientError::Cancelled(_) => ExitCode::Interrupted,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }
        ExitCode::GeneralError
    }
}
