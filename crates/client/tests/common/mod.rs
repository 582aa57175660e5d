//! Common test utilities for integration tests.
//!
//! Shared helpers for standing up a mock management plane with wiremock and
//! building a client against it. All integration tests use these to stay
//! consistent.
#![allow(dead_code)]

use std::time::Duration;

use secrecy::SecretString;
use virtmgr_client::watch::WatchOptions;
use virtmgr_client::VirtClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Poll interval used in tests; short so watcher-driven tests stay fast.
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Build a client against the mock server with test-friendly watch options.
pub fn client_for(server: &MockServer) -> VirtClient {
    VirtClient::builder()
        .base_url(server.uri())
        .credentials(
            "root".to_string(),
            SecretString::new("secret".to_string().into()),
        )
        .watch_options(
            WatchOptions::new(TEST_POLL_INTERVAL).max_wait(Duration::from_secs(5)),
        )
        .build()
        .expect("test client should build")
}

/// Mount the session-create endpoint returning a fixed token.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json("test-session-token"))
        .mount(server)
        .await;
}

/// Build a task-status JSON body.
pub fn task_json(
    id: &str,
    description: &str,
    target: &str,
    state: &str,
    error: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "description": description,
        "target": target,
        "state": state,
        "error": error,
    })
}

/// Mount a task-status endpoint that reports `interim` for the first
/// `interim_polls` polls, then `terminal` (with optional error detail).
pub async fn mount_task_sequence(
    server: &MockServer,
    task_id: &str,
    description: &str,
    target: &str,
    interim_polls: u64,
    terminal: &str,
    error: Option<&str>,
) {
    let task_path = format!("/api/tasks/{}", task_id);
    if interim_polls > 0 {
        Mock::given(method("GET"))
            .and(path(task_path.clone()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(task_json(task_id, description, target, "RUNNING", None)),
            )
            .up_to_n_times(interim_polls)
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(task_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(task_json(task_id, description, target, terminal, error)),
        )
        .mount(server)
        .await;
}
