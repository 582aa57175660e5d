//! Configuration management for virtmgr.
//!
//! This crate provides types and loaders for managing management-plane
//! connection configuration from environment variables and CLI overrides.

pub mod constants;
mod loader;
mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig, Credentials, WatchConfig};
