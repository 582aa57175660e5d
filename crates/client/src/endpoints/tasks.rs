//! Task endpoints.
//!
//! # What this module handles:
//! - Reading a task's status
//! - Waiting for a task to complete over HTTP (the watcher's submit-side
//!   wrapper)
//!
//! # What this module does NOT handle:
//! - Submitting tasks (each resource module submits its own)
//! - The poll-loop semantics themselves (see [`crate::watch`])

use reqwest::Client;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::TaskStatus;
use crate::watch::{WatchOptions, watch};

/// Get the status of a task. Read-only on the management plane.
pub async fn get_task(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    task_id: &str,
    max_retries: usize,
) -> Result<TaskStatus> {
    debug!("Getting status for task: {}", task_id);

    let url = format!("{}/api/tasks/{}", base_url, task_id);
    let builder = client.get(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    let status: TaskStatus = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse task status: {}", e)))?;

    Ok(status)
}

/// Wait for a task to reach a terminal state, polling its status endpoint.
#[allow(clippy::too_many_arguments)]
pub async fn wait_for_task(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    task_id: &str,
    options: &WatchOptions,
    max_retries: usize,
    cancel: Option<&CancelToken>,
) -> Result<TaskStatus> {
    watch(
        || get_task(client, base_url, auth_token, task_id, max_retries),
        options,
        cancel,
    )
    .await
}
