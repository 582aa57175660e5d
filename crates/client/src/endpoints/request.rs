//! Retry helper for HTTP requests with exponential backoff.
//!
//! Wraps a `reqwest::RequestBuilder` with retry logic for transient
//! failures (429 and gateway errors), and maps non-success responses to
//! [`ClientError::ApiError`] with the management plane's error message.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Maximum number of retry attempts when the caller passes 0.
const DEFAULT_MAX_RETRIES: usize = 3;

/// Extract a readable message from an error response body.
///
/// The management plane returns either `{"error": {"message": "..."}}` or
/// plain text; fall back to the raw body when the shape is unexpected.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}

/// Sends an HTTP request, retrying transient failures with exponential
/// backoff (1s, 2s, 4s = 2^attempt).
///
/// Retryable: HTTP 429, 502, 503, 504. Everything else either succeeds or
/// maps to [`ClientError::ApiError`] immediately.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    let max_retries = if max_retries == 0 {
        DEFAULT_MAX_RETRIES
    } else {
        max_retries
    };

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                // Non-clonable builders get a single attempt
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return builder.send().await.map_err(ClientError::from);
                } else {
                    return Err(ClientError::MaxRetriesExceeded(attempt));
                }
            }
        };

        match attempt_builder.send().await {
            Ok(response) if ClientError::is_retryable_status(response.status().as_u16()) => {
                if attempt < max_retries {
                    let backoff_secs = 2u64.pow(attempt as u32);
                    debug!(
                        attempt = attempt + 1,
                        status = response.status().as_u16(),
                        backoff_secs,
                        "Transient failure, retrying with exponential backoff"
                    );
                    tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                } else {
                    debug!(attempts = attempt + 1, "Max retries exhausted");
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
            }
            Ok(response) => {
                if response.status().is_success() {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Request succeeded after retry");
                    }
                    return Ok(response);
                }

                let status = response.status().as_u16();
                let url = response.url().to_string();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Could not read error response body".to_string());

                return Err(ClientError::ApiError {
                    status,
                    url,
                    message: error_message(&body),
                });
            }
            Err(e) => {
                // Transport errors propagate immediately
                return Err(ClientError::from(e));
            }
        }
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}
