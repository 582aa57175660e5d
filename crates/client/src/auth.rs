//! Session management for the management-plane connection.
//!
//! The management plane authenticates with username/password and hands back
//! a session token with an idle timeout. The [`SessionManager`] holds the
//! credentials, the current token, and the expiry bookkeeping so the client
//! can re-login transparently.

use secrecy::{ExposeSecret, SecretString};
use std::time::Instant;
use virtmgr_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;

/// Manages management-plane session tokens with automatic renewal.
#[derive(Debug)]
pub struct SessionManager {
    username: String,
    password: SecretString,
    session_token: Option<SessionToken>,
}

/// Session token with expiry information.
#[derive(Debug, Clone)]
struct SessionToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer_seconds: u64,
}

impl SessionToken {
    fn new(
        value: SecretString,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) -> Self {
        let expires_at =
            ttl_seconds.map(|ttl| Instant::now() + std::time::Duration::from_secs(ttl));
        Self {
            value,
            expires_at,
            expiry_buffer_seconds: expiry_buffer_seconds.unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        }
    }

    /// True once the token is within the buffer window of its expiry time.
    ///
    /// Refreshing slightly early prevents a token from expiring in the middle
    /// of an API call.
    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| {
                let buffer = std::time::Duration::from_secs(self.expiry_buffer_seconds);
                exp.saturating_duration_since(Instant::now()) < buffer
            })
            .unwrap_or(false)
    }
}

impl SessionManager {
    /// Create a new session manager for the given credentials.
    pub fn new(username: String, password: SecretString) -> Self {
        Self {
            username,
            password,
            session_token: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Get the bearer token for API requests, if a valid session exists.
    pub fn bearer_token(&self) -> Option<&str> {
        self.session_token.as_ref().map(|t| t.value.expose_secret())
    }

    /// Set the session token (received from the login response).
    ///
    /// # Arguments
    /// * `token` - The session token string
    /// * `ttl_seconds` - Time-to-live in seconds (None means no expiry)
    /// * `expiry_buffer_seconds` - Buffer before expiry to trigger proactive
    ///   re-login (None uses the default of 60 seconds)
    pub fn set_session_token(
        &mut self,
        token: String,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) {
        self.session_token = Some(SessionToken::new(
            SecretString::new(token.into()),
            ttl_seconds,
            expiry_buffer_seconds,
        ));
    }

    /// Check if the current session token is expired or expiring soon.
    /// A manager without a token counts as expired.
    pub fn is_session_expired(&self) -> bool {
        self.session_token
            .as_ref()
            .map(|t| t.is_expired())
            .unwrap_or(true)
    }

    /// Clear the current session token (force re-authentication).
    pub fn clear_session(&mut self) {
        self.session_token = None;
    }
}
