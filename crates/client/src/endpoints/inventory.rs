//! Inventory listing endpoints.
//!
//! The inventory tree is datacenters → clusters → hosts → VMs; each level is
//! listed by filtering on its parent's id.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{Cluster, Datacenter, Host, Vm};

async fn parse_list<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<Vec<T>> {
    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse {} list: {}", what, e)))
}

/// List all datacenters.
pub async fn list_datacenters(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
) -> Result<Vec<Datacenter>> {
    debug!("Listing datacenters");

    let url = format!("{}/api/datacenters", base_url);
    let builder = client.get(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    parse_list(response, "datacenter").await
}

/// List the clusters under a datacenter.
pub async fn list_clusters(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    datacenter_id: &str,
    max_retries: usize,
) -> Result<Vec<Cluster>> {
    debug!("Listing clusters in datacenter {}", datacenter_id);

    let url = format!("{}/api/clusters", base_url);
    let builder = client
        .get(&url)
        .bearer_auth(auth_token)
        .query(&[("datacenter", datacenter_id)]);
    let response = send_request_with_retry(builder, max_retries).await?;

    parse_list(response, "cluster").await
}

/// List the hosts under a cluster.
pub async fn list_hosts(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    cluster_id: &str,
    max_retries: usize,
) -> Result<Vec<Host>> {
    debug!("Listing hosts in cluster {}", cluster_id);

    let url = format!("{}/api/hosts", base_url);
    let builder = client
        .get(&url)
        .bearer_auth(auth_token)
        .query(&[("cluster", cluster_id)]);
    let response = send_request_with_retry(builder, max_retries).await?;

    parse_list(response, "host").await
}

/// List the VMs placed on a host.
pub async fn list_vms(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    max_retries: usize,
) -> Result<Vec<Vm>> {
    debug!("Listing VMs on host {}", host_id);

    let url = format!("{}/api/vms", base_url);
    let builder = client
        .get(&url)
        .bearer_auth(auth_token)
        .query(&[("host", host_id)]);
    let response = send_request_with_retry(builder, max_retries).await?;

    parse_list(response, "VM").await
}
