//! Session endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};

/// Create a session, returning the session token.
///
/// The management plane authenticates the `POST /api/session` request with
/// HTTP basic auth and responds with the token as a bare JSON string.
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
    max_retries: usize,
) -> Result<String> {
    debug!("Creating session as {}", username);

    let url = format!("{}/api/session", base_url);
    let builder = client.post(&url).basic_auth(username, Some(password));
    let response = send_request_with_retry(builder, max_retries)
        .await
        .map_err(|e| match e {
            ClientError::ApiError { status: 401, .. } => {
                ClientError::AuthFailed(format!("invalid credentials for user '{}'", username))
            }
            other => other,
        })?;

    let token: String = response
        .json()
        .await
        .map_err(|_| ClientError::InvalidResponse("Missing session token in response".to_string()))?;

    Ok(token)
}

/// Delete the current session.
pub async fn logout(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
) -> Result<()> {
    debug!("Deleting session");

    let url = format!("{}/api/session", base_url);
    let builder = client.delete(&url).bearer_auth(auth_token);
    send_request_with_retry(builder, max_retries).await?;

    Ok(())
}
