//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the appropriate command handlers.
//! - Pass the cancellation token through to task-waiting commands.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main`).

use anyhow::Result;
use virtmgr_client::CancelToken;
use virtmgr_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config, cancel: &CancelToken) -> Result<()> {
    match cli.command {
        Commands::Inventory => {
            commands::inventory::run(config).await?;
        }
        Commands::Host { command } => {
            commands::host::run(config, command, cancel).await?;
        }
        Commands::StorageNetwork { command } => {
            commands::network::run(config, command, cancel).await?;
        }
    }
    Ok(())
}
