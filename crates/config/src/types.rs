//! Configuration types for the virtmgr workspace.
//!
//! Responsibilities:
//! - Define connection settings (base URL, TLS verification, timeouts, retries).
//! - Define credentials and task-watch settings.
//! - Provide serialization helpers for `Duration` and `SecretString`.
//!
//! Does NOT handle:
//! - Configuration loading from env/dotenv (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Secrets use `secrecy::SecretString` to prevent accidental logging.

use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_MAX_WAIT_SECS, DEFAULT_MGMT_PORT,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SESSION_TTL_SECS, DEFAULT_TIMEOUT_SECS,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing SecretString as a plain string.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Connection configuration for the management plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the management plane (e.g., https://vcenter.lab.local)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Connection timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for failed requests
    pub max_retries: usize,
    /// Session time-to-live in seconds (how long session tokens remain valid)
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Buffer time before session expiry to proactively re-login (in seconds)
    #[serde(default = "default_session_expiry_buffer")]
    pub session_expiry_buffer_seconds: u64,
}

pub(crate) fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

pub(crate) fn default_session_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

/// Username/password credentials for the management plane session login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

/// Task watcher configuration.
///
/// Controls how often a submitted task's status is polled and how long the
/// watcher waits before declaring a timeout. A zero poll interval is a
/// configuration error and is rejected by the loader and by the watcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Poll interval for task status checks (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub poll_interval: Duration,
    /// Maximum time to wait for task completion; `None` waits indefinitely
    #[serde(default, with = "opt_duration_seconds")]
    pub max_wait: Option<Duration>,
}

mod opt_duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_wait: Some(Duration::from_secs(DEFAULT_MAX_WAIT_SECS)),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Session login credentials
    pub credentials: Credentials,
    /// Task watcher settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for Config {
    /// Creates a default configuration with development-only credentials.
    ///
    /// # Security Warning
    ///
    /// The defaults target `https://localhost` with `root`/`changeme` and are
    /// **ONLY** appropriate for a local lab. Production use must supply
    /// explicit configuration via environment variables or CLI flags.
    fn default() -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: format!("https://localhost:{}", DEFAULT_MGMT_PORT),
                skip_verify: false,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                max_retries: DEFAULT_MAX_RETRIES,
                session_ttl_seconds: default_session_ttl(),
                session_expiry_buffer_seconds: default_session_expiry_buffer(),
            },
            credentials: Credentials {
                username: "root".to_string(),
                password: SecretString::new("changeme".to_string().into()),
            },
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    /// Checks if this configuration is using the default development
    /// credentials, so callers can warn before talking to a real endpoint.
    pub fn is_using_default_credentials(&self) -> bool {
        use secrecy::ExposeSecret;

        self.credentials.username == "root"
            && self.credentials.password.expose_secret() == "changeme"
    }

    /// Create a new config with the specified base URL and credentials.
    pub fn with_credentials(base_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..Config::default().connection
            },
            credentials: Credentials { username, password },
            watch: WatchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.base_url, "https://localhost:443");
        assert!(!config.connection.skip_verify);
        assert_eq!(config.watch.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_connection_config_serde_seconds() {
        let config = ConnectionConfig {
            base_url: "https://vcenter.lab.local".to_string(),
            skip_verify: true,
            timeout: Duration::from_secs(60),
            max_retries: 5,
            session_ttl_seconds: default_session_ttl(),
            session_expiry_buffer_seconds: default_session_expiry_buffer(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ConnectionConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.timeout, Duration::from_secs(60));
        assert_eq!(deserialized.max_retries, 5);
    }

    #[test]
    fn test_watch_config_serde_optional_max_wait() {
        let config = WatchConfig {
            poll_interval: Duration::from_secs(2),
            max_wait: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: WatchConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.poll_interval, Duration::from_secs(2));
        assert_eq!(deserialized.max_wait, None);
    }

    /// Config Debug output must not expose the password.
    #[test]
    fn test_config_debug_does_not_expose_secrets() {
        let password = SecretString::new("my-secret-password".to_string().into());
        let config = Config::with_credentials(
            "https://vcenter.lab.local".to_string(),
            "administrator".to_string(),
            password,
        );

        let debug_output = format!("{:?}", config);

        assert!(
            !debug_output.contains("my-secret-password"),
            "Debug output should not contain the password"
        );

        // Non-sensitive data stays visible
        assert!(debug_output.contains("administrator"));
        assert!(debug_output.contains("https://vcenter.lab.local"));
    }

    #[test]
    fn test_is_using_default_credentials_true_for_default_config() {
        let config = Config::default();
        assert!(config.is_using_default_credentials());
    }

    #[test]
    fn test_is_using_default_credentials_false_for_custom() {
        let password = SecretString::new("supersecret123".to_string().into());
        let config = Config::with_credentials(
            "https://vcenter.prod.local".to_string(),
            "svc-automation".to_string(),
            password,
        );
        assert!(!config.is_using_default_credentials());
    }

    /// Serialization includes the password (for persistence); secrecy guards
    /// logging, not persistence.
    #[test]
    fn test_credentials_serialization_round_trip() {
        use secrecy::ExposeSecret;

        let creds = Credentials {
            username: "root".to_string(),
            password: SecretString::new("serializable-password".to_string().into()),
        };

        let json = serde_json::to_string(&creds).unwrap();
        assert!(json.contains("serializable-password"));

        let deserialized: Credentials = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.username, "root");
        assert_eq!(deserialized.password.expose_secret(), "serializable-password");
    }
}
