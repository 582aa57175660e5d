//! Task polling integration tests: the watcher driving the HTTP task
//! endpoint end-to-end against a mock management plane.

mod common;

use std::time::Duration;

use common::{client_for, mount_login, mount_task_sequence, task_json};
use secrecy::SecretString;
use virtmgr_client::watch::WatchOptions;
use virtmgr_client::{ClientError, TaskState, VirtClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_wait_for_task_polls_until_succeeded() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_task_sequence(
        &server,
        "task-1",
        "Enter maintenance mode",
        "esxi-01",
        2,
        "SUCCEEDED",
        None,
    )
    .await;

    let mut client = client_for(&server);
    let status = client.wait_for_task("task-1", None).await.unwrap();

    assert_eq!(status.state, TaskState::Succeeded);
    assert_eq!(status.target, "esxi-01");
}

#[tokio::test]
async fn test_wait_for_task_terminal_on_first_poll() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/task-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(
            "task-2",
            "Move host into cluster",
            "esxi-01",
            "SUCCEEDED",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let status = client.wait_for_task("task-2", None).await.unwrap();
    assert_eq!(status.state, TaskState::Succeeded);
}

#[tokio::test]
async fn test_wait_for_task_failure_carries_detail_verbatim() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_task_sequence(
        &server,
        "task-3",
        "Add host to cluster",
        "10.0.0.12",
        1,
        "FAILED",
        Some("disk full"),
    )
    .await;

    let mut client = client_for(&server);
    let err = client.wait_for_task("task-3", None).await.unwrap_err();

    match err {
        ClientError::TaskFailed {
            description,
            target,
            detail,
        } => {
            assert_eq!(description, "Add host to cluster");
            assert_eq!(target, "10.0.0.12");
            assert_eq!(detail, "disk full");
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_task_times_out_on_stuck_task() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/task-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(
            "task-4",
            "Remove host",
            "esxi-03",
            "RUNNING",
            None,
        )))
        .mount(&server)
        .await;

    let mut client = VirtClient::builder()
        .base_url(server.uri())
        .credentials(
            "root".to_string(),
            SecretString::new("secret".to_string().into()),
        )
        .watch_options(
            WatchOptions::new(Duration::from_millis(10)).max_wait(Duration::from_millis(50)),
        )
        .build()
        .unwrap();

    let err = client.wait_for_task("task-4", None).await.unwrap_err();
    assert!(matches!(err, ClientError::TaskTimedOut { .. }));
}

#[tokio::test]
async fn test_wait_for_task_surfaces_unknown_state() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_task_sequence(
        &server,
        "task-5",
        "Reconfigure storage network",
        "esxi-01",
        0,
        "QUEUED_FOR_RETRY",
        None,
    )
    .await;

    let mut client = client_for(&server);
    let err = client.wait_for_task("task-5", None).await.unwrap_err();

    match err {
        ClientError::UnknownTaskState { state, .. } => assert_eq!(state, "QUEUED_FOR_RETRY"),
        other => panic!("expected UnknownTaskState, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_task_missing_task_is_api_error() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/task-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"message": "task not found"}
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client.wait_for_task("task-404", None).await.unwrap_err();

    match err {
        ClientError::ApiError { status, message, .. } => {
            assert_eq!(status, 404);
            assert_eq!(message, "task not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
