//! Main management-plane REST client.
//!
//! # What this module handles:
//! - Client construction (builder) and the HTTP/session plumbing
//! - Session login/logout and transparent re-authentication
//! - Driving submitted tasks to completion via the watcher
//!
//! # What this module does NOT handle:
//! - Raw endpoint HTTP calls (see [`crate::endpoints`])
//! - Poll-loop semantics (see [`crate::watch`])

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::auth::SessionManager;
use crate::cancel::CancelToken;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::TaskStatus;
use crate::watch::WatchOptions;

mod hosts;
mod inventory;
mod network;

pub use inventory::{ClusterInventory, DatacenterInventory, HostInventory};

/// Call an endpoint with the current session token, re-authenticating once
/// if the management plane rejects the session.
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $token:ident, $call:expr) => {{
        let $token = $self.auth_token().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status: 401, .. }) => {
                ::tracing::debug!("Session rejected, clearing and re-authenticating...");
                $self.session_manager.clear_session();
                let $token = $self.auth_token().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// Builder for creating a new [`VirtClient`].
pub struct VirtClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    session_ttl_seconds: u64,
    session_expiry_buffer_seconds: u64,
    watch_options: WatchOptions,
}

impl Default for VirtClientBuilder {
    fn default() -> Self {
        let defaults = virtmgr_config::Config::default();
        Self {
            base_url: None,
            username: None,
            password: None,
            skip_verify: false,
            timeout: defaults.connection.timeout,
            max_retries: defaults.connection.max_retries,
            session_ttl_seconds: defaults.connection.session_ttl_seconds,
            session_expiry_buffer_seconds: defaults.connection.session_expiry_buffer_seconds,
            watch_options: WatchOptions::default(),
        }
    }
}

impl VirtClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the management plane.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the session login credentials.
    pub fn credentials(mut self, username: String, password: SecretString) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Set whether to skip TLS verification (self-signed certificates).
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the task watcher options.
    pub fn watch_options(mut self, options: WatchOptions) -> Self {
        self.watch_options = options;
        self
    }

    /// Normalize a base URL by removing trailing slashes, preventing double
    /// slashes when concatenating endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<VirtClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let username = self
            .username
            .ok_or_else(|| ClientError::AuthFailed("credentials are required".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| ClientError::AuthFailed("credentials are required".to_string()))?;

        if self.watch_options.poll_interval.is_zero() {
            return Err(ClientError::InvalidPollInterval);
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5));

        if self.skip_verify && base_url.starts_with("https://") {
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }

        let http = http_builder.build()?;

        Ok(VirtClient {
            http,
            base_url,
            session_manager: SessionManager::new(username, password),
            max_retries: self.max_retries,
            session_ttl_seconds: self.session_ttl_seconds,
            session_expiry_buffer_seconds: self.session_expiry_buffer_seconds,
            watch_options: self.watch_options,
        })
    }
}

/// Management-plane REST API client.
///
/// Owns the HTTP connection, the authenticated session, and the watcher
/// defaults. Sessions are created lazily on first use and renewed
/// transparently; callers release the session with [`VirtClient::logout`]
/// on all exit paths.
#[derive(Debug)]
pub struct VirtClient {
    http: reqwest::Client,
    base_url: String,
    pub(crate) session_manager: SessionManager,
    max_retries: usize,
    session_ttl_seconds: u64,
    session_expiry_buffer_seconds: u64,
    watch_options: WatchOptions,
}

impl VirtClient {
    /// Create a new client builder.
    pub fn builder() -> VirtClientBuilder {
        VirtClientBuilder::new()
    }

    /// Build a client from an assembled configuration.
    pub fn from_config(config: &virtmgr_config::Config) -> Result<Self> {
        Self::builder()
            .base_url(config.connection.base_url.clone())
            .credentials(
                config.credentials.username.clone(),
                config.credentials.password.clone(),
            )
            .skip_verify(config.connection.skip_verify)
            .timeout(config.connection.timeout)
            .max_retries(config.connection.max_retries)
            .watch_options(WatchOptions::from(&config.watch))
            .build()
    }

    /// Login with the configured credentials to get a session token.
    pub async fn login(&mut self) -> Result<String> {
        let token = endpoints::login(
            &self.http,
            &self.base_url,
            self.session_manager.username(),
            self.session_manager.password().expose_secret(),
            self.max_retries,
        )
        .await?;

        self.session_manager.set_session_token(
            token.clone(),
            Some(self.session_ttl_seconds),
            Some(self.session_expiry_buffer_seconds),
        );
        info!(
            "Session established with {} as {}",
            self.base_url,
            self.session_manager.username()
        );

        Ok(token)
    }

    /// Release the current session, if any.
    ///
    /// Safe to call on every exit path; a client without a session is a
    /// no-op.
    pub async fn logout(&mut self) -> Result<()> {
        let Some(token) = self.session_manager.bearer_token() else {
            return Ok(());
        };
        let token = token.to_string();
        let result = endpoints::logout(&self.http, &self.base_url, &token, self.max_retries).await;
        self.session_manager.clear_session();
        info!("Session with {} released", self.base_url);
        result
    }

    /// Get the current session token, logging in if necessary.
    pub(crate) async fn auth_token(&mut self) -> Result<String> {
        if self.session_manager.is_session_expired() {
            self.login().await?;
        }

        self.session_manager
            .bearer_token()
            .map(|s| s.to_string())
            .ok_or(ClientError::SessionExpired)
    }

    /// Wait for a submitted task to reach a terminal state.
    pub async fn wait_for_task(
        &mut self,
        task_id: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<TaskStatus> {
        let options = self.watch_options.clone();
        crate::retry_call!(
            self,
            __token,
            endpoints::wait_for_task(
                &self.http,
                &self.base_url,
                &__token,
                task_id,
                &options,
                self.max_retries,
                cancel,
            )
            .await
        )
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the watcher options this client applies to submitted tasks.
    pub fn watch_options(&self) -> &WatchOptions {
        &self.watch_options
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn max_retries(&self) -> usize {
        self.max_retries
    }
}
