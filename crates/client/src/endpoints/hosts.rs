//! Host lifecycle endpoints.
//!
//! Every mutation here is asynchronous on the management-plane side and
//! returns a task id; callers drive it to completion with
//! [`crate::endpoints::tasks::wait_for_task`].

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{TaskSubmitted, VirtualNic};

/// Maintenance-mode transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceAction {
    /// Evacuate the host before structural changes.
    Enter,
    /// Return the host to service.
    Exit,
}

impl MaintenanceAction {
    fn as_str(self) -> &'static str {
        match self {
            MaintenanceAction::Enter => "enter",
            MaintenanceAction::Exit => "exit",
        }
    }
}

#[derive(Serialize)]
struct MaintenanceRequest {
    action: &'static str,
    /// Only meaningful when entering: migrate powered-off VMs off the host
    /// as part of the evacuation.
    evacuate_powered_off_vms: bool,
}

/// Request a maintenance-mode transition. Returns the task id.
pub async fn set_maintenance_mode(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    action: MaintenanceAction,
    max_retries: usize,
) -> Result<String> {
    debug!("Requesting maintenance-mode {} for host {}", action.as_str(), host_id);

    let url = format!("{}/api/hosts/{}/maintenance", base_url, host_id);
    let body = MaintenanceRequest {
        action: action.as_str(),
        evacuate_powered_off_vms: action == MaintenanceAction::Enter,
    };
    let builder = client.post(&url).bearer_auth(auth_token).json(&body);
    let response = send_request_with_retry(builder, max_retries).await?;

    let submitted: TaskSubmitted = response.json().await.map_err(|_| {
        ClientError::InvalidResponse("Missing task id in maintenance response".to_string())
    })?;

    Ok(submitted.task)
}

/// Remove a host from the inventory. Returns the task id.
///
/// The host must already be in maintenance mode.
pub async fn remove_host(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    max_retries: usize,
) -> Result<String> {
    debug!("Requesting removal of host {}", host_id);

    let url = format!("{}/api/hosts/{}", base_url, host_id);
    let builder = client.delete(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    let submitted: TaskSubmitted = response.json().await.map_err(|_| {
        ClientError::InvalidResponse("Missing task id in host removal response".to_string())
    })?;

    Ok(submitted.task)
}

/// List the VMkernel network interfaces of a host.
pub async fn list_vnics(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    host_id: &str,
    max_retries: usize,
) -> Result<Vec<VirtualNic>> {
    debug!("Listing VMkernel interfaces on host {}", host_id);

    let url = format!("{}/api/hosts/{}/vnics", base_url, host_id);
    let builder = client.get(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse vnic list: {}", e)))
}
