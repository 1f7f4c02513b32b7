use std::collections::HashSet;
use std::sync::Arc;
use taskpad_core::{
    InMemoryTaskRepository, StoreError, TaskDraft, TaskPatch, TaskRepository, TaskStore,
};
use uuid::Uuid;

fn store() -> TaskStore<InMemoryTaskRepository> {
    TaskStore::new(InMemoryTaskRepository::new())
}

#[tokio::test]
async fn create_returns_task_with_defaults_and_prepends() {
    let store = store();

    let task = store.create_task(TaskDraft::new("Buy milk")).await.unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "");
    assert!(!task.done);

    let cached = store.tasks();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, task.id);
    assert_eq!(cached[0].title, "Buy milk");
}

#[tokio::test]
async fn create_assigns_unique_ids() {
    let store = store();
    let mut seen = HashSet::new();
    for title in ["a", "b", "c"] {
        let task = store.create_task(TaskDraft::new(title)).await.unwrap();
        assert!(seen.insert(task.id));
    }
}

#[tokio::test]
async fn newest_task_is_at_the_head() {
    let store = store();
    store.create_task(TaskDraft::new("older")).await.unwrap();
    let newest = store.create_task(TaskDraft::new("newer")).await.unwrap();

    assert_eq!(store.tasks()[0].id, newest.id);

    let listed = store.list_tasks().await.unwrap();
    assert_eq!(listed[0].id, newest.id);
}

#[tokio::test]
async fn blank_title_is_rejected_before_any_round_trip() {
    let store = store();

    let err = store.create_task(TaskDraft::new("   ")).await.unwrap_err();
    assert_eq!(err, StoreError::from(taskpad_core::TaskValidationError::BlankTitle));

    assert!(store.tasks().is_empty());
    assert!(store.last_error().is_none());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn activate_performs_the_initial_list() {
    let repo = Arc::new(InMemoryTaskRepository::new());
    repo.insert_task(&TaskDraft::new("pre-existing")).await.unwrap();

    let store = TaskStore::activate(Arc::clone(&repo)).await;
    let cached = store.tasks();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].title, "pre-existing");
    assert!(!store.is_loading());
}

#[tokio::test]
async fn list_replaces_the_cache_wholesale() {
    let repo = Arc::new(InMemoryTaskRepository::new());
    let store = TaskStore::new(Arc::clone(&repo));

    let kept = store.create_task(TaskDraft::new("kept")).await.unwrap();
    let removed = store.create_task(TaskDraft::new("removed elsewhere")).await.unwrap();

    // Another client deletes a row behind the store's back.
    repo.delete_task(removed.id).await.unwrap();

    let listed = store.list_tasks().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
    assert_eq!(store.tasks(), listed);
}

#[tokio::test]
async fn update_then_get_reflects_change_and_preserves_other_fields() {
    let store = store();
    let task = store
        .create_task(TaskDraft::new("write report").with_description("quarterly"))
        .await
        .unwrap();

    store.update_task(task.id, TaskPatch::done(true)).await.unwrap();

    let fetched = store.get_task(task.id).await.unwrap();
    assert!(fetched.done);
    assert_eq!(fetched.title, "write report");
    assert_eq!(fetched.description, "quarterly");
    assert_eq!(fetched.created_at, task.created_at);
    assert!(fetched.updated_at.is_some());

    assert!(store.tasks()[0].done);
}

#[tokio::test]
async fn get_does_not_mutate_the_cache() {
    let store = store();
    let task = store.create_task(TaskDraft::new("only one")).await.unwrap();

    let before = store.tasks();
    store.get_task(task.id).await.unwrap();
    assert_eq!(store.tasks(), before);
}

#[tokio::test]
async fn sequential_updates_last_write_wins() {
    let store = store();
    let task = store.create_task(TaskDraft::new("toggle me")).await.unwrap();

    store.update_task(task.id, TaskPatch::done(true)).await.unwrap();
    store.update_task(task.id, TaskPatch::done(false)).await.unwrap();

    assert!(!store.tasks()[0].done);
}

#[tokio::test]
async fn delete_removes_from_cache_and_subsequent_lists() {
    let store = store();
    let doomed = store.create_task(TaskDraft::new("doomed")).await.unwrap();
    store.create_task(TaskDraft::new("survivor")).await.unwrap();

    store.delete_task(doomed.id).await.unwrap();
    assert!(store.tasks().iter().all(|task| task.id != doomed.id));

    let listed = store.list_tasks().await.unwrap();
    assert!(listed.iter().all(|task| task.id != doomed.id));
}

#[tokio::test]
async fn delete_of_unknown_id_is_a_reported_success() {
    let store = store();
    store.create_task(TaskDraft::new("untouched")).await.unwrap();
    let before = store.tasks();

    store.delete_task(Uuid::new_v4()).await.unwrap();

    assert_eq!(store.tasks(), before);
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn update_of_unknown_id_fails_without_touching_the_cache() {
    let store = store();
    store.create_task(TaskDraft::new("untouched")).await.unwrap();
    let before = store.tasks();

    let result = store.update_task(Uuid::new_v4(), TaskPatch::done(true)).await;
    assert!(result.is_err());

    assert_eq!(store.tasks(), before);
    assert!(store.last_error().is_some());
    assert!(!store.is_loading());
}
