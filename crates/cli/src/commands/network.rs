//! Storage-network command implementations.

use anyhow::Result;
use clap::Subcommand;
use tracing::warn;
use virtmgr_client::{CancelToken, VirtClient};
use virtmgr_config::Config;

#[derive(Subcommand)]
pub enum StorageNetworkCommand {
    /// Show whether the host's network interface is ready for storage
    /// clustering
    Status {
        /// Host name or IP address
        host: String,
    },

    /// Bind the storage-clustering service to the host's first VMkernel
    /// interface
    Configure {
        /// Host name or IP address
        host: String,

        /// Enable the service; only valid once the host has joined a
        /// storage cluster
        #[arg(long)]
        enable: bool,
    },
}

pub async fn run(config: Config, command: StorageNetworkCommand, cancel: &CancelToken) -> Result<()> {
    let mut client = VirtClient::from_config(&config)?;

    let result = execute(&mut client, command, cancel).await;

    // Release the session on success and failure alike
    if let Err(e) = client.logout().await {
        warn!("Failed to release session: {}", e);
    }

    result
}

async fn execute(
    client: &mut VirtClient,
    command: StorageNetworkCommand,
    cancel: &CancelToken,
) -> Result<()> {
    match command {
        StorageNetworkCommand::Status { host } => {
            let target = client.find_host(&host).await?;
            let config = client.storage_network(&target).await?;
            println!("Host: {}", target.name);
            println!("Storage clustering enabled: {}", config.enabled);
            match config.ports.first() {
                Some(port) => println!("Storage network device: {}", port.device),
                None => println!("Storage network device: (none)"),
            }
            println!(
                "Ready to join a storage cluster: {}",
                if config.is_ready() { "yes" } else { "no" }
            );
        }
        StorageNetworkCommand::Configure { host, enable } => {
            let target = client.find_host(&host).await?;
            client
                .configure_storage_network(&target, enable, Some(cancel))
                .await?;
            println!(
                "Host '{}' successfully reconfigured its network for storage clustering!",
                host
            );
        }
    }
    Ok(())
}
