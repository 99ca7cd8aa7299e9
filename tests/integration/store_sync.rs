//! Integration tests for store/server synchronization.
//!
//! Runs a real `taskdeck-server` on an OS-assigned port and drives a
//! [`TaskStore`] through the HTTP gateway, checking that every local
//! mutation is confirmed by the server before it lands and that the
//! two collections stay in lockstep.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskdeck::gateway::http::HttpGateway;
use taskdeck::gateway::{GatewayError, TaskGateway};
use taskdeck::store::TaskStore;
use taskdeck_proto::{TaskDraft, TaskId, TaskStatus};
use taskdeck_server::server::{ApiState, start_server, start_server_with_state};
use taskdeck_server::store::TaskTable;

/// Starts an empty server and returns a store wired to it.
async fn store_against_fresh_server() -> TaskStore<HttpGateway> {
    let (addr, _handle) = start_server("127.0.0.1:0").await.expect("server start");
    let gateway =
        HttpGateway::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("gateway");
    TaskStore::new(gateway)
}

fn draft(title: &str, description: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: description.to_string(),
        status: TaskStatus::Todo,
    }
}

#[tokio::test]
async fn full_crud_round_trip() {
    let mut store = store_against_fresh_server().await;

    store.load().await.unwrap();
    assert!(store.tasks().is_empty());

    let id = store.add(&draft("Ship release", "tag and publish")).await.unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, id);

    store.update_status(id, TaskStatus::InProgress).await.unwrap();
    assert_eq!(store.tasks()[0].status, TaskStatus::InProgress);

    store.update_description(id, "tag, publish, announce").await.unwrap();
    assert_eq!(store.tasks()[0].description, "tag, publish, announce");

    store.remove(id).await.unwrap();
    assert!(store.tasks().is_empty());

    // A fresh load confirms the server agrees.
    store.load().await.unwrap();
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn load_replaces_collection_wholesale() {
    let state = Arc::new(ApiState::with_table(TaskTable::with_seed()));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("server start");
    let gateway =
        HttpGateway::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("gateway");
    let mut store = TaskStore::new(gateway);

    store.load().await.unwrap();
    let seeded = store.tasks().len();
    assert!(seeded > 0);

    // Loading again yields the same collection, not a concatenation.
    store.load().await.unwrap();
    assert_eq!(store.tasks().len(), seeded);
}

#[tokio::test]
async fn server_assigns_ids_client_appends() {
    let mut store = store_against_fresh_server().await;
    store.load().await.unwrap();

    let first = store.add(&draft("First task", "")).await.unwrap();
    let second = store.add(&draft("Second task", "")).await.unwrap();

    assert_eq!(first, TaskId::new(1));
    assert_eq!(second, TaskId::new(2));
    let ids: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn rejected_draft_leaves_store_untouched() {
    let mut store = store_against_fresh_server().await;
    store.load().await.unwrap();

    let result = store.add(&draft("ab", "too short to accept")).await;
    assert!(matches!(result, Err(GatewayError::Validation(_))));
    assert!(store.tasks().is_empty());

    store.load().await.unwrap();
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn patch_of_deleted_task_is_not_found() {
    let mut store = store_against_fresh_server().await;
    store.load().await.unwrap();

    let id = store.add(&draft("Ephemeral", "")).await.unwrap();
    store.remove(id).await.unwrap();

    // Drive the gateway directly to observe the server's 404.
    let result = store.gateway().set_status(id, TaskStatus::Done).await;
    assert_eq!(result, Err(GatewayError::NotFound(id)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port 1 is privileged and unbound in the test environment.
    let gateway =
        HttpGateway::new("http://127.0.0.1:1", Duration::from_secs(1)).expect("gateway");
    let mut store = TaskStore::new(gateway);

    let result = store.load().await;
    assert!(matches!(result, Err(GatewayError::Network(_))));
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn failed_mutation_preserves_local_state() {
    let mut store = store_against_fresh_server().await;
    store.load().await.unwrap();
    let id = store.add(&draft("Sticky task", "")).await.unwrap();

    // Delete behind the store's back, then try to mutate through it.
    store.gateway().delete(id).await.unwrap();
    let result = store.update_status(id, TaskStatus::Done).await;

    assert_eq!(result, Err(GatewayError::NotFound(id)));
    // The local copy still shows the last confirmed state.
    assert_eq!(store.tasks()[0].status, TaskStatus::Todo);
}

#[tokio::test]
async fn two_stores_converge_through_load() {
    let (addr, _handle) = start_server("127.0.0.1:0").await.expect("server start");
    let base = format!("http://{addr}");
    let mut writer = TaskStore::new(
        HttpGateway::new(&base, Duration::from_secs(5)).expect("gateway"),
    );
    let mut reader = TaskStore::new(
        HttpGateway::new(&base, Duration::from_secs(5)).expect("gateway"),
    );

    writer.load().await.unwrap();
    let id = writer.add(&draft("Shared task", "visible to both")).await.unwrap();
    writer.update_status(id, TaskStatus::Done).await.unwrap();

    reader.load().await.unwrap();
    assert_eq!(reader.tasks(), writer.tasks());
}
