//! Cluster membership endpoints.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{HostConnectSpec, TaskSubmitted};

#[derive(Serialize)]
struct MoveHostRequest<'a> {
    host: &'a str,
}

/// Move an already-managed host into a cluster. Returns the task id.
///
/// The host must be in maintenance mode before it can be moved.
pub async fn move_host_into(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    cluster_id: &str,
    host_id: &str,
    max_retries: usize,
) -> Result<String> {
    info!("Moving host {} into cluster {}", host_id, cluster_id);

    let url = format!("{}/api/clusters/{}/hosts", base_url, cluster_id);
    let builder = client
        .post(&url)
        .bearer_auth(auth_token)
        .query(&[("action", "move")])
        .json(&MoveHostRequest { host: host_id });
    let response = send_request_with_retry(builder, max_retries).await?;

    let submitted: TaskSubmitted = response.json().await.map_err(|_| {
        ClientError::InvalidResponse("Missing task id in host move response".to_string())
    })?;

    Ok(submitted.task)
}

/// Add a standalone host to a cluster using a connect spec. Returns the
/// task id.
pub async fn add_host(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    cluster_id: &str,
    spec: &HostConnectSpec,
    max_retries: usize,
) -> Result<String> {
    info!("Adding host {} to cluster {}", spec.host_name, cluster_id);
    debug!("Connect spec port: {}, as_connected: {}", spec.port, spec.as_connected);

    let url = format!("{}/api/clusters/{}/hosts", base_url, cluster_id);
    let builder = client
        .post(&url)
        .bearer_auth(auth_token)
        .query(&[("action", "add")])
        .json(spec);
    let response = send_request_with_retry(builder, max_retries).await?;

    let submitted: TaskSubmitted = response.json().await.map_err(|_| {
        ClientError::InvalidResponse("Missing task id in host add response".to_string())
    })?;

    Ok(submitted.task)
}
