//! Centralized constants for the virtmgr workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default management-plane API port.
pub const DEFAULT_MGMT_PORT: u16 = 443;

/// Default port used when connecting to a standalone host (TLS thumbprint
/// retrieval and the host-add connect spec).
pub const DEFAULT_HOST_PORT: u16 = 443;

/// Default session time-to-live in seconds (30 minutes, the management
/// plane's idle session timeout).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

/// Default buffer time before session expiry to proactively re-login.
/// This prevents race conditions where a token expires during an API call.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

// =============================================================================
// Task Polling Defaults
// =============================================================================

/// Default polling interval for task status checks in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Default maximum time to wait for a task to reach a terminal state, in
/// seconds. Maintenance-mode evacuations can legitimately take minutes.
pub const DEFAULT_MAX_WAIT_SECS: u64 = 600;

/// Emit a still-waiting heartbeat log line every N polls.
pub const DEFAULT_HEARTBEAT_EVERY_POLLS: u32 = 30;

// =============================================================================
// Thumbprint Format
// =============================================================================

/// Number of colon-separated hex byte-pairs in a SHA-1 certificate
/// thumbprint. A connect spec with any other pair count is rejected.
pub const THUMBPRINT_PAIR_COUNT: usize = 20;
