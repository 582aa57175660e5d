//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not assemble configuration (see `main`).

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "virtmgr")]
#[command(about = "Manage virtualization host lifecycle from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  virtmgr inventory\n  virtmgr host move esxi-01.lab.local --cluster Storage\n  virtmgr host add 10.0.0.12 --cluster Compute --host-username root\n  virtmgr host maintenance enter esxi-01.lab.local\n  virtmgr storage-network status esxi-01.lab.local\n"
)]
pub struct Cli {
    /// Base URL of the management plane (e.g., https://vcenter.lab.local)
    #[arg(short = 's', long, global = true, env = "VIRTMGR_URL")]
    pub url: Option<String>,

    /// Username for session authentication
    #[arg(short, long, global = true, env = "VIRTMGR_USERNAME")]
    pub username: Option<String>,

    /// Password for session authentication
    #[arg(short, long, global = true, env = "VIRTMGR_PASSWORD")]
    pub password: Option<String>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "VIRTMGR_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Connection timeout in seconds
    #[arg(long, global = true, env = "VIRTMGR_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for failed requests
    #[arg(long, global = true, env = "VIRTMGR_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Task poll interval in seconds (must be greater than zero)
    #[arg(long, global = true, env = "VIRTMGR_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Maximum seconds to wait for a task; 0 waits indefinitely
    #[arg(long, global = true, env = "VIRTMGR_MAX_WAIT")]
    pub max_wait: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the inventory tree (datacenters, clusters, hosts, VMs)
    Inventory,

    /// Host lifecycle operations
    Host {
        #[command(subcommand)]
        command: commands::host::HostCommand,
    },

    /// Storage-clustering network service on a host
    StorageNetwork {
        #[command(subcommand)]
        command: commands::network::StorageNetworkCommand,
    },
}
