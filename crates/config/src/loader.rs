//! Configuration loading from environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load connection/credential/watch settings from `VIRTMGR_*` env vars.
//! - Provide a builder API so the CLI can layer flag overrides on top.
//! - Validate the assembled configuration before it reaches the client.
//!
//! Does NOT handle:
//! - CLI flag parsing (see the cli crate).
//! - Secrets storage beyond in-memory `SecretString`.
//!
//! Invariants:
//! - Env vars override nothing set explicitly through `with_*` methods;
//!   callers apply layers in increasing priority order.
//! - `build()` never returns a config with a zero poll interval.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::constants::DEFAULT_MAX_WAIT_SECS;
use crate::types::{Config, ConnectionConfig, Credentials, WatchConfig};

/// Errors raised while assembling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Read an environment variable, treating empty/whitespace values as unset.
pub fn env_var_or_none(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value,
        reason: "not a valid number".to_string(),
    })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            reason: "expected a boolean (true/false/1/0)".to_string(),
        }),
    }
}

/// Builder that assembles a [`Config`] from env vars and explicit overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    poll_interval: Option<Duration>,
    max_wait: Option<Option<Duration>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `.env` file from the current directory if one exists.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_dotenv(&self) -> Result<(), ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!("Loaded environment from {}", path.display());
                Ok(())
            }
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::Dotenv(e)),
        }
    }

    /// Apply `VIRTMGR_*` environment variables to any field not already set.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if self.base_url.is_none() {
            self.base_url = env_var_or_none("VIRTMGR_URL");
        }
        if self.username.is_none() {
            self.username = env_var_or_none("VIRTMGR_USERNAME");
        }
        if self.password.is_none() {
            self.password = env_var_or_none("VIRTMGR_PASSWORD").map(|p| SecretString::new(p.into()));
        }
        if self.skip_verify.is_none()
            && let Some(v) = env_var_or_none("VIRTMGR_SKIP_VERIFY")
        {
            self.skip_verify = Some(parse_bool("VIRTMGR_SKIP_VERIFY", v)?);
        }
        if self.timeout.is_none()
            && let Some(v) = env_var_or_none("VIRTMGR_TIMEOUT")
        {
            self.timeout = Some(Duration::from_secs(parse_env("VIRTMGR_TIMEOUT", v)?));
        }
        if self.max_retries.is_none()
            && let Some(v) = env_var_or_none("VIRTMGR_MAX_RETRIES")
        {
            self.max_retries = Some(parse_env("VIRTMGR_MAX_RETRIES", v)?);
        }
        if self.poll_interval.is_none()
            && let Some(v) = env_var_or_none("VIRTMGR_POLL_INTERVAL")
        {
            let secs: u64 = parse_env("VIRTMGR_POLL_INTERVAL", v.clone())?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "VIRTMGR_POLL_INTERVAL",
                    value: v,
                    reason: "poll interval must be greater than zero".to_string(),
                });
            }
            self.poll_interval = Some(Duration::from_secs(secs));
        }
        if self.max_wait.is_none()
            && let Some(v) = env_var_or_none("VIRTMGR_MAX_WAIT")
        {
            // 0 disables the limit (wait indefinitely)
            let secs: u64 = parse_env("VIRTMGR_MAX_WAIT", v)?;
            self.max_wait = Some((secs > 0).then(|| Duration::from_secs(secs)));
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Validate and assemble the final [`Config`].
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::Missing("base URL"))?;
        let parsed = Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            name: "base URL",
            value: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: "base URL",
                value: base_url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        let username = self.username.ok_or(ConfigError::Missing("username"))?;
        let password = self.password.ok_or(ConfigError::Missing("password"))?;

        let defaults = Config::default();
        let watch_defaults = WatchConfig::default();

        let poll_interval = self.poll_interval.unwrap_or(watch_defaults.poll_interval);
        if poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                name: "poll interval",
                value: "0".to_string(),
                reason: "poll interval must be greater than zero".to_string(),
            });
        }

        Ok(Config {
            connection: ConnectionConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                skip_verify: self.skip_verify.unwrap_or(false),
                timeout: self.timeout.unwrap_or(defaults.connection.timeout),
                max_retries: self.max_retries.unwrap_or(defaults.connection.max_retries),
                session_ttl_seconds: defaults.connection.session_ttl_seconds,
                session_expiry_buffer_seconds: defaults.connection.session_expiry_buffer_seconds,
            },
            credentials: Credentials { username, password },
            watch: WatchConfig {
                poll_interval,
                max_wait: self
                    .max_wait
                    .unwrap_or(Some(Duration::from_secs(DEFAULT_MAX_WAIT_SECS))),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn loader_with_required() -> ConfigLoader {
        ConfigLoader::new()
            .with_base_url("https://vcenter.lab.local".to_string())
            .with_username("administrator".to_string())
            .with_password("secret".to_string())
    }

    #[test]
    fn test_build_with_explicit_values() {
        let config = loader_with_required()
            .with_skip_verify(true)
            .with_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.connection.base_url, "https://vcenter.lab.local");
        assert!(config.connection.skip_verify);
        assert_eq!(config.connection.timeout, Duration::from_secs(60));
        assert_eq!(config.credentials.password.expose_secret(), "secret");
    }

    #[test]
    fn test_build_normalizes_trailing_slash() {
        let config = ConfigLoader::new()
            .with_base_url("https://vcenter.lab.local/".to_string())
            .with_username("u".to_string())
            .with_password("p".to_string())
            .build()
            .unwrap();

        assert_eq!(config.connection.base_url, "https://vcenter.lab.local");
    }

    #[test]
    fn test_build_missing_base_url() {
        let err = ConfigLoader::new()
            .with_username("u".to_string())
            .with_password("p".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("base URL")));
    }

    #[test]
    fn test_build_rejects_bad_scheme() {
        let err = ConfigLoader::new()
            .with_base_url("ftp://vcenter.lab.local".to_string())
            .with_username("u".to_string())
            .with_password("p".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "base URL", .. }));
    }

    #[test]
    fn test_build_rejects_zero_poll_interval() {
        let err = loader_with_required()
            .with_poll_interval(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "poll interval", .. }));
    }

    #[test]
    fn test_from_env_reads_connection_settings() {
        temp_env::with_vars(
            [
                ("VIRTMGR_URL", Some("https://vc.example.org")),
                ("VIRTMGR_USERNAME", Some("svc-automation")),
                ("VIRTMGR_PASSWORD", Some("env-secret")),
                ("VIRTMGR_SKIP_VERIFY", Some("true")),
                ("VIRTMGR_POLL_INTERVAL", Some("5")),
                ("VIRTMGR_MAX_WAIT", Some("120")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.connection.base_url, "https://vc.example.org");
                assert_eq!(config.credentials.username, "svc-automation");
                assert!(config.connection.skip_verify);
                assert_eq!(config.watch.poll_interval, Duration::from_secs(5));
                assert_eq!(config.watch.max_wait, Some(Duration::from_secs(120)));
            },
        );
    }

    #[test]
    fn test_from_env_zero_max_wait_disables_limit() {
        temp_env::with_vars(
            [
                ("VIRTMGR_URL", Some("https://vc.example.org")),
                ("VIRTMGR_USERNAME", Some("u")),
                ("VIRTMGR_PASSWORD", Some("p")),
                ("VIRTMGR_MAX_WAIT", Some("0")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.watch.max_wait, None);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_zero_poll_interval() {
        temp_env::with_vars([("VIRTMGR_POLL_INTERVAL", Some("0"))], || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid {
                    name: "VIRTMGR_POLL_INTERVAL",
                    ..
                }
            ));
        });
    }

    #[test]
    fn test_explicit_values_take_priority_over_env() {
        temp_env::with_vars([("VIRTMGR_USERNAME", Some("from-env"))], || {
            let loader = ConfigLoader::new()
                .with_username("from-flag".to_string())
                .from_env()
                .unwrap();
            let config = loader
                .with_base_url("https://vc.example.org".to_string())
                .with_password("p".to_string())
                .build()
                .unwrap();
            assert_eq!(config.credentials.username, "from-flag");
        });
    }

    #[test]
    fn test_env_var_or_none_ignores_blank() {
        temp_env::with_vars([("VIRTMGR_BLANK_TEST", Some("   "))], || {
            assert_eq!(env_var_or_none("VIRTMGR_BLANK_TEST"), None);
        });
    }
}
