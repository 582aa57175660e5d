//! Inventory command implementation.

use anyhow::Result;
use tracing::{info, warn};
use virtmgr_client::{DatacenterInventory, VirtClient};
use virtmgr_config::Config;

pub async fn run(config: Config) -> Result<()> {
    let mut client = VirtClient::from_config(&config)?;

    info!("Fetching inventory from {}", client.base_url());
    let result = client.inventory_tree().await;

    // Release the session on success and failure alike
    if let Err(e) = client.logout().await {
        warn!("Failed to release session: {}", e);
    }

    print_tree(&result?);
    Ok(())
}

fn print_tree(tree: &[DatacenterInventory]) {
    println!("Number of datacenters found: {}", tree.len());
    for dc in tree {
        println!("- Datacenter found with name: {}", dc.datacenter.name);
        println!(
            "    Number of clusters found for datacenter '{}': {}",
            dc.datacenter.name,
            dc.clusters.len()
        );
        for cluster in &dc.clusters {
            println!("    - Cluster found with name: {}", cluster.cluster.name);
            println!(
                "        Number of hosts found for cluster '{}': {}",
                cluster.cluster.name,
                cluster.hosts.len()
            );
            for host in &cluster.hosts {
                println!("        - Host found with name: {}", host.host.name);
                println!(
                    "                Number of VMs found for host '{}': {}",
                    host.host.name,
                    host.vms.len()
                );
                for vm in &host.vms {
                    println!("                - VM found with name: {}", vm.name);
                }
            }
        }
    }
}
