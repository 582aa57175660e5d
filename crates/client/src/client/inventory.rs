//! Inventory API methods for [`VirtClient`].
//!
//! # What this module handles:
//! - Listing datacenters, clusters, hosts, and VMs
//! - Resolving hosts and clusters by name or IP
//! - Assembling the full inventory tree for display
//!
//! # What this module does NOT handle:
//! - Mutating inventory (see [`super::hosts`])

use crate::client::VirtClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{Cluster, Datacenter, Host, Vm};

/// A host with the VMs placed on it.
#[derive(Debug, Clone)]
pub struct HostInventory {
    pub host: Host,
    pub vms: Vec<Vm>,
}

/// A cluster with its hosts.
#[derive(Debug, Clone)]
pub struct ClusterInventory {
    pub cluster: Cluster,
    pub hosts: Vec<HostInventory>,
}

/// A datacenter with its clusters.
#[derive(Debug, Clone)]
pub struct DatacenterInventory {
    pub datacenter: Datacenter,
    pub clusters: Vec<ClusterInventory>,
}

impl VirtClient {
    /// List all datacenters.
    pub async fn list_datacenters(&mut self) -> Result<Vec<Datacenter>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_datacenters(self.http(), self.base_url(), &__token, self.max_retries())
                .await
        )
    }

    /// List the clusters under a datacenter.
    pub async fn list_clusters(&mut self, datacenter_id: &str) -> Result<Vec<Cluster>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_clusters(
                self.http(),
                self.base_url(),
                &__token,
                datacenter_id,
                self.max_retries(),
            )
            .await
        )
    }

    /// List the hosts under a cluster.
    pub async fn list_hosts(&mut self, cluster_id: &str) -> Result<Vec<Host>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_hosts(
                self.http(),
                self.base_url(),
                &__token,
                cluster_id,
                self.max_retries(),
            )
            .await
        )
    }

    /// List the VMs placed on a host.
    pub async fn list_vms(&mut self, host_id: &str) -> Result<Vec<Vm>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_vms(
                self.http(),
                self.base_url(),
                &__token,
                host_id,
                self.max_retries(),
            )
            .await
        )
    }

    /// Resolve a host by its name or IP address, walking the inventory tree.
    ///
    /// Returns [`ClientError::NotFound`] if no host matches.
    pub async fn find_host(&mut self, name: &str) -> Result<Host> {
        for datacenter in self.list_datacenters().await? {
            for cluster in self.list_clusters(&datacenter.id).await? {
                for host in self.list_hosts(&cluster.id).await? {
                    if host.name == name {
                        return Ok(host);
                    }
                }
            }
        }
        Err(ClientError::NotFound(format!("host '{}'", name)))
    }

    /// Resolve a cluster by name.
    ///
    /// Returns [`ClientError::NotFound`] if no cluster matches.
    pub async fn find_cluster(&mut self, name: &str) -> Result<Cluster> {
        for datacenter in self.list_datacenters().await? {
            for cluster in self.list_clusters(&datacenter.id).await? {
                if cluster.name == name {
                    return Ok(cluster);
                }
            }
        }
        Err(ClientError::NotFound(format!("cluster '{}'", name)))
    }

    /// Assemble the full inventory tree: datacenters → clusters → hosts → VMs.
    pub async fn inventory_tree(&mut self) -> Result<Vec<DatacenterInventory>> {
        let mut tree = Vec::new();
        for datacenter in self.list_datacenters().await? {
            let mut clusters = Vec::new();
            for cluster in self.list_clusters(&datacenter.id).await? {
                let mut hosts = Vec::new();
                for host in self.list_hosts(&cluster.id).await? {
                    let vms = self.list_vms(&host.id).await?;
                    hosts.push(HostInventory { host, vms });
                }
                clusters.push(ClusterInventory { cluster, hosts });
            }
            tree.push(DatacenterInventory {
                datacenter,
                clusters,
            });
        }
        Ok(tree)
    }
}
