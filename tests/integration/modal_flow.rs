//! Integration tests for the modal workflows over a live store.
//!
//! Drives the add, edit, and remove state machines end to end against a
//! loopback gateway, including the cases where several modals are open
//! at once and where a confirmed write lands after its modal closed.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::gateway::GatewayError;
use taskdeck::gateway::loopback::LoopbackGateway;
use taskdeck::modal::{AddModal, EditModal, ModalError, RemoveModal};
use taskdeck::store::TaskStore;
use taskdeck_proto::{Task, TaskId, TaskStatus};

fn task(id: u64, title: &str, status: TaskStatus) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: String::new(),
        status,
    }
}

async fn loaded_store(tasks: Vec<Task>) -> TaskStore<LoopbackGateway> {
    let mut store = TaskStore::new(LoopbackGateway::with_tasks(tasks));
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn add_edit_remove_lifecycle() {
    let mut store = loaded_store(Vec::new()).await;

    // Add.
    let mut add = AddModal::new();
    add.open();
    add.draft_mut().unwrap().title = "Paint the fence".to_string();
    add.draft_mut().unwrap().description = "white, two coats".to_string();
    add.confirm(&mut store).await.unwrap();
    assert!(!add.is_open());
    assert_eq!(store.tasks().len(), 1);
    let created = store.tasks()[0].clone();

    // Edit: immediate status commit, then a description rewrite.
    let mut edit = EditModal::new();
    edit.open(&created);
    edit.commit_status(&mut store, TaskStatus::InProgress)
        .await
        .unwrap();
    assert!(edit.is_open());

    edit.set_description_editable(true);
    assert!(edit.edit_description("white, three coats"));
    edit.submit_description(&mut store).await.unwrap();
    assert!(!edit.is_open());

    let edited = store.tasks()[0].clone();
    assert_eq!(edited.status, TaskStatus::InProgress);
    assert_eq!(edited.description, "white, three coats");

    // Remove.
    let mut remove = RemoveModal::new();
    remove.open(&edited);
    remove.confirm(&mut store).await.unwrap();
    assert!(!remove.is_open());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn invalid_add_retries_until_valid() {
    let mut store = loaded_store(Vec::new()).await;
    let mut add = AddModal::new();

    add.open();
    add.draft_mut().unwrap().title = "ab".to_string();
    let result = add.confirm(&mut store).await;
    assert!(matches!(result, Err(ModalError::Draft(_))));
    assert!(add.is_open());
    // Validation is local, the gateway never heard about it.
    assert_eq!(store.gateway().request_count(), 1); // just the load

    add.draft_mut().unwrap().title = "abc".to_string();
    add.confirm(&mut store).await.unwrap();
    assert!(!add.is_open());
    assert_eq!(store.tasks()[0].title, "abc");
}

#[tokio::test]
async fn three_modals_open_simultaneously() {
    let mut store = loaded_store(vec![
        task(1, "Alpha", TaskStatus::Todo),
        task(2, "Beta", TaskStatus::Todo),
    ])
    .await;
    let alpha = store.tasks()[0].clone();
    let beta = store.tasks()[1].clone();

    // No mutual exclusion between the workflows.
    let mut add = AddModal::new();
    let mut edit = EditModal::new();
    let mut remove = RemoveModal::new();
    add.open();
    edit.open(&alpha);
    remove.open(&beta);
    assert!(add.is_open() && edit.is_open() && remove.is_open());

    // Each confirms against its own target without disturbing the others.
    remove.confirm(&mut store).await.unwrap();
    assert!(add.is_open() && edit.is_open());

    edit.commit_status(&mut store, TaskStatus::Done).await.unwrap();
    assert!(add.is_open() && edit.is_open());

    add.draft_mut().unwrap().title = "Gamma".to_string();
    add.confirm(&mut store).await.unwrap();

    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Gamma"]);
    assert_eq!(store.tasks()[0].status, TaskStatus::Done);
}

#[tokio::test]
async fn edit_snapshot_is_detached_from_store() {
    let mut store = loaded_store(vec![task(1, "Original", TaskStatus::Todo)]).await;
    let original = store.tasks()[0].clone();

    let mut edit = EditModal::new();
    edit.open(&original);
    edit.set_description_editable(true);
    edit.edit_description("draft only");

    // The store never sees unsubmitted draft edits.
    assert_eq!(store.tasks()[0].description, "");

    // A concurrent status change through the store does not touch the draft.
    store
        .update_status(original.id, TaskStatus::Done)
        .await
        .unwrap();
    assert_eq!(edit.snapshot().unwrap().draft.status, TaskStatus::Todo);
    assert_eq!(edit.snapshot().unwrap().draft.description, "draft only");
}

#[tokio::test]
async fn late_write_lands_after_modal_closed() {
    let mut store = loaded_store(vec![task(1, "Slow", TaskStatus::Todo)]).await;
    let target = store.tasks()[0].clone();

    let mut edit = EditModal::new();
    edit.open(&target);
    edit.close();

    // The response outlives the modal; the store still applies it.
    store
        .update_status(target.id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(store.tasks()[0].status, TaskStatus::InProgress);
}

#[tokio::test]
async fn remove_failure_then_retry_converges() {
    let mut store = loaded_store(vec![task(1, "Stubborn", TaskStatus::Todo)]).await;
    let target = store.tasks()[0].clone();

    let mut remove = RemoveModal::new();
    remove.open(&target);

    store
        .gateway()
        .fail_next(GatewayError::Network("connection reset".to_string()));
    assert!(remove.confirm(&mut store).await.is_err());
    assert!(remove.is_open());
    assert_eq!(store.tasks().len(), 1);

    remove.confirm(&mut store).await.unwrap();
    assert!(!remove.is_open());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn listeners_fire_once_per_confirmed_mutation() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let mut store = loaded_store(Vec::new()).await;
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut add = AddModal::new();
    add.open();
    add.draft_mut().unwrap().title = "ab".to_string();
    let _ = add.confirm(&mut store).await; // invalid, no notification
    add.draft_mut().unwrap().title = "Notify me".to_string();
    add.confirm(&mut store).await.unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
