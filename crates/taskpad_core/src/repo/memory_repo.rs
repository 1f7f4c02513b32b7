//! In-memory task repository.
//!
//! # Responsibility
//! - Stand in for the remote store in development environments without
//!   remote configuration, and in tests.
//! - Mirror the remote semantics: exactly-one fetch, zero-row delete is
//!   still a success, newest-first listing.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Process-local `TaskRepository` holding tasks newest-first.
///
/// Construction never fails and needs no configuration.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    rows: Mutex<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Task>> {
        // Critical sections below never panic; recover anyway.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            done: draft.done,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.rows().insert(0, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut tasks = self.rows().clone();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn fetch_task(&self, id: TaskId) -> RepoResult<Task> {
        self.rows()
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let mut rows = self.rows();
        let task = rows
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(RepoError::NotFound(id))?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        task.updated_at = Some(Utc::now());

        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.rows().retain(|task| task.id != id);
        Ok(())
    }
}
