//! Storage-network endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{StorageNetworkConfig, TaskSubmitted};

/// Read a host's storage-network configuration.
pub async fn get_storage_network(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    max_retries: usize,
) -> Result<StorageNetworkConfig> {
    debug!("Reading storage-network config of host {}", host_id);

    let url = format!("{}/api/hosts/{}/storage-network", base_url, host_id);
    let builder = client.get(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse storage-network config: {}", e))
    })
}

/// Replace a host's storage-network configuration. Returns the task id.
pub async fn update_storage_network(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    config: &StorageNetworkConfig,
    max_retries: usize,
) -> Result<String> {
    debug!(
        "Updating storage-network config of host {} (enabled: {})",
        host_id, config.enabled
    );

    let url = format!("{}/api/hosts/{}/storage-network", base_url, host_id);
    let builder = client.put(&url).bearer_auth(auth_token).json(config);
    let response = send_request_with_retry(builder, max_retries).await?;

    let submitted: TaskSubmitted = response.json().await.map_err(|_| {
        ClientError::InvalidResponse("Missing task id in storage-network response".to_string())
    })?;

    Ok(submitted.task)
}
