//! virtmgr - command-line host lifecycle automation for a virtualization
//! management plane.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Assemble configuration and run commands via the shared client library.
//! - Map typed errors to structured exit codes at a single boundary.
//!
//! Does NOT handle:
//! - REST API implementation or task-polling logic (see `crates/client`).
//!
//! Invariants:
//! - `.env` is loaded BEFORE CLI parsing so clap env defaults see its values.
//! - One failure aborts the whole workflow; nothing is resubmitted.

mod args;
mod commands;
mod dispatch;
mod error;

use std::time::Duration;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use virtmgr_client::{CancelToken, ClientError};
use virtmgr_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Load .env before CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Apply CLI flags first (highest priority), then fill the rest from env
    let mut loader = ConfigLoader::new();
    if let Some(ref url) = cli.url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(poll_secs) = cli.poll_interval {
        loader = loader.with_poll_interval(Duration::from_secs(poll_secs));
    }
    if let Some(max_wait_secs) = cli.max_wait {
        // 0 disables the limit
        loader = loader.with_max_wait((max_wait_secs > 0).then(|| Duration::from_secs(max_wait_secs)));
    }

    loader = match loader.from_env() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to load configuration from environment: {:#}", e);
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
    };

    let config = match loader.build() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
    };

    if config.is_using_default_credentials() {
        tracing::warn!(
            "Using default credentials (root/changeme). \
             These are for local lab use only - change before production use."
        );
    }

    // Wire Ctrl-C to the cancellation token the watcher observes
    let cancel = CancelToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            eprintln!("^C\nOperation cancelled by user");
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Returns true if this anyhow error represents a user-driven cancellation.
fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ClientError>(), Some(ClientError::Cancelled(_))))
}
