//! Host lifecycle command implementations.

use anyhow::Result;
use clap::Subcommand;
use secrecy::SecretString;
use tracing::{info, warn};
use virtmgr_client::{CancelToken, VirtClient};
use virtmgr_config::Config;
use virtmgr_config::constants::DEFAULT_HOST_PORT;

#[derive(Subcommand)]
pub enum HostCommand {
    /// Add a standalone host to a cluster
    Add {
        /// DNS name or IP address of the host
        host: String,

        /// Destination cluster name
        #[arg(long)]
        cluster: String,

        /// Administration account on the host
        #[arg(long)]
        host_username: String,

        /// Password of the administration account on the host
        #[arg(long, env = "VIRTMGR_HOST_PASSWORD")]
        host_password: Option<String>,

        /// Port to connect to on the host
        #[arg(long, default_value_t = DEFAULT_HOST_PORT)]
        port: u16,
    },

    /// Remove a host from the inventory (enters maintenance mode first)
    Remove {
        /// Host name or IP address
        host: String,
    },

    /// Move a host to another cluster (maintenance mode around the move)
    Move {
        /// Host name or IP address
        host: String,

        /// Destination cluster name
        #[arg(long)]
        cluster: String,
    },

    /// Maintenance-mode transitions
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommand,
    },
}

#[derive(Subcommand)]
pub enum MaintenanceCommand {
    /// Put a host into maintenance mode
    Enter {
        /// Host name or IP address
        host: String,
    },
    /// Take a host out of maintenance mode
    Exit {
        /// Host name or IP address
        host: String,
    },
}

pub async fn run(config: Config, command: HostCommand, cancel: &CancelToken) -> Result<()> {
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
    command: HostCommand,
    cancel: &CancelToken,
) -> Result<()> {
    match command {
        HostCommand::Add {
            host,
            cluster,
            host_username,
            host_password,
            port,
        } => {
            let host_password = host_password.ok_or_else(|| {
                anyhow::anyhow!(
                    "host password is required (--host-password or VIRTMGR_HOST_PASSWORD)"
                )
            })?;
            info!("Adding host '{}' to cluster '{}'", host, cluster);
            let added = client
                .add_host_to_cluster(
                    &host,
                    port,
                    &host_username,
                    &SecretString::new(host_password.into()),
                    &cluster,
                    Some(cancel),
                )
                .await?;
            println!(
                "Host '{}' successfully added to cluster '{}'!",
                added.name, cluster
            );
        }
        HostCommand::Remove { host } => {
            info!("Removing host '{}'", host);
            client.remove_host(&host, Some(cancel)).await?;
            println!("Host '{}' successfully removed from the inventory!", host);
        }
        HostCommand::Move { host, cluster } => {
            info!("Moving host '{}' to cluster '{}'", host, cluster);
            client
                .move_host_to_cluster(&host, &cluster, Some(cancel))
                .await?;
            println!("Host '{}' moved successfully to cluster '{}'!", host, cluster);
        }
        HostCommand::Maintenance { command } => match command {
            MaintenanceCommand::Enter { host } => {
                let target = client.find_host(&host).await?;
                client.enter_maintenance_mode(&target, Some(cancel)).await?;
                println!("Host '{}' entered maintenance mode successfully!", host);
            }
            MaintenanceCommand::Exit { host } => {
                let target = client.find_host(&host).await?;
                client.exit_maintenance_mode(&target, Some(cancel)).await?;
                println!("Host '{}' exited maintenance mode successfully!", host);
            }
        },
    }
    Ok(())
}
