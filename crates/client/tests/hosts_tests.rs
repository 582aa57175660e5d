//! Host lifecycle procedure tests: maintenance → operation → maintenance
//! sequencing against a mock management plane.

mod common;

use common::{client_for, mount_login, mount_task_sequence};
use virtmgr_client::models::{Host, HostConnectionState};
use virtmgr_client::ClientError;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn host() -> Host {
    Host {
        id: "host-1".to_string(),
        name: "esxi-01.lab.local".to_string(),
        connection_state: HostConnectionState::Connected,
        in_maintenance: false,
    }
}

async fn mount_lookup(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/datacenters"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "dc-1", "name": "Lab DC"}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clusters"))
        .and(query_param("datacenter", "dc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "cl-1", "name": "Compute"},
            {"id": "cl-2", "name": "Storage"},
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/hosts"))
        .and(query_param("cluster", "cl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "host-1", "name": "esxi-01.lab.local", "connection_state": "CONNECTED"},
        ])))
        .mount(server)
        .await;
}

async fn mount_maintenance(server: &MockServer, action: &str, task_id: &str) {
    Mock::given(method("POST"))
        .and(path("/api/hosts/host-1/maintenance"))
        .and(body_partial_json(serde_json::json!({"action": action})))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(serde_json::json!({"task": task_id})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_move_host_runs_maintenance_move_maintenance_in_order() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_lookup(&server).await;

    mount_maintenance(&server, "enter", "task-enter").await;
    mount_task_sequence(
        &server,
        "task-enter",
        "Enter maintenance mode",
        "esxi-01.lab.local",
        1,
        "SUCCEEDED",
        None,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/api/clusters/cl-2/hosts"))
        .and(query_param("action", "move"))
        .and(body_partial_json(serde_json::json!({"host": "host-1"})))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(serde_json::json!({"task": "task-move"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_task_sequence(
        &server,
        "task-move",
        "Move host into cluster",
        "esxi-01.lab.local",
        2,
        "SUCCEEDED",
        None,
    )
    .await;

    mount_maintenance(&server, "exit", "task-exit").await;
    mount_task_sequence(
        &server,
        "task-exit",
        "Exit maintenance mode",
        "esxi-01.lab.local",
        0,
        "SUCCEEDED",
        None,
    )
    .await;

    let mut client = client_for(&server);
    client
        .move_host_to_cluster("esxi-01.lab.local", "Storage", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_move_host_aborts_when_move_task_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_lookup(&server).await;

    mount_maintenance(&server, "enter", "task-enter").await;
    mount_task_sequence(
        &server,
        "task-enter",
        "Enter maintenance mode",
        "esxi-01.lab.local",
        0,
        "SUCCEEDED",
        None,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/api/clusters/cl-2/hosts"))
        .and(query_param("action", "move"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(serde_json::json!({"task": "task-move"})),
        )
        .mount(&server)
        .await;
    mount_task_sequence(
        &server,
        "task-move",
        "Move host into cluster",
        "esxi-01.lab.local",
        0,
        "FAILED",
        Some("insufficient resources"),
    )
    .await;

    // Fail-fast: the host must not be taken out of maintenance mode
    Mock::given(method("POST"))
        .and(path("/api/hosts/host-1/maintenance"))
        .and(body_partial_json(serde_json::json!({"action": "exit"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client
        .move_host_to_cluster("esxi-01.lab.local", "Storage", None)
        .await
        .unwrap_err();

    match err {
        ClientError::TaskFailed { detail, target, .. } => {
            assert_eq!(detail, "insufficient resources");
            assert_eq!(target, "esxi-01.lab.local");
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remove_host_enters_maintenance_first() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_lookup(&server).await;

    mount_maintenance(&server, "enter", "task-enter").await;
    mount_task_sequence(
        &server,
        "task-enter",
        "Enter maintenance mode",
        "esxi-01.lab.local",
        0,
        "SUCCEEDED",
        None,
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/api/hosts/host-1"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(serde_json::json!({"task": "task-rm"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_task_sequence(
        &server,
        "task-rm",
        "Remove host",
        "esxi-01.lab.local",
        1,
        "SUCCEEDED",
        None,
    )
    .await;

    let mut client = client_for(&server);
    client
        .remove_host("esxi-01.lab.local", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_configure_storage_network_binds_first_vmkernel_interface() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/hosts/host-1/vnics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"device": "vmk0"},
            {"device": "vmk1"},
        ])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/hosts/host-1/storage-network"))
        .and(body_partial_json(serde_json::json!({
            "enabled": false,
            "ports": [{"device": "vmk0"}],
        })))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(serde_json::json!({"task": "task-net"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_task_sequence(
        &server,
        "task-net",
        "Reconfigure storage network",
        "esxi-01.lab.local",
        1,
        "SUCCEEDED",
        None,
    )
    .await;

    let mut client = client_for(&server);
    client
        .configure_storage_network(&host(), false, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_configure_storage_network_without_vnics_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/hosts/host-1/vnics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client
        .configure_storage_network(&host(), false, None)
        .await
        .unwrap_err();

    match err {
        ClientError::NotFound(what) => assert!(what.contains("esxi-01.lab.local")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_storage_network_readiness_check() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/hosts/host-1/storage-network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "enabled": false,
            "ports": [{"device": "vmk0"}],
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    assert!(client.is_storage_network_ready(&host()).await.unwrap());
}
