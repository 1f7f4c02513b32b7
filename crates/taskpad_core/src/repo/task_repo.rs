//! Task repository contract.
//!
//! # Responsibility
//! - Provide a stable async CRUD API over the remote `task` collection.
//! - Keep implementations substitutable (REST-backed or in-memory).
//!
//! # Invariants
//! - `fetch_task` succeeds only when exactly one row matches the id.
//! - `delete_task` affecting zero rows is still a success.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surface for remote task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    Http(reqwest::Error),
    /// Remote rejected the request; message forwarded verbatim.
    Api { status: u16, message: String },
    /// Exactly-one lookup matched zero or multiple rows.
    NotFound(TaskId),
    /// Endpoint or payload data that does not parse.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{err}"),
            Self::Api { status, message } => write!(f, "remote store error ({status}): {message}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid remote store data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Api { .. } | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<reqwest::Error> for RepoError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Repository interface for task CRUD operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns the stored row with its assigned id.
    async fn insert_task(&self, draft: &TaskDraft) -> RepoResult<Task>;

    /// Lists all tasks, newest-first by creation time.
    async fn list_tasks(&self) -> RepoResult<Vec<Task>>;

    /// Fetches exactly one task by id.
    async fn fetch_task(&self, id: TaskId) -> RepoResult<Task>;

    /// Applies a partial update and returns the updated row.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;

    /// Deletes a task by id. Deleting an unknown id is not an error.
    async fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

// Lets callers keep a handle on a repository they also hand to the store.
#[async_trait]
impl<R: TaskRepository + ?Sized> TaskRepository for std::sync::Arc<R> {
    async fn insert_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        (**self).insert_task(draft).await
    }

    async fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        (**self).list_tasks().await
    }

    async fn fetch_task(&self, id: TaskId) -> RepoResult<Task> {
        (**self).fetch_task(id).await
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        (**self).update_task(id, patch).await
    }

    async fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        (**self).delete_task(id).await
    }
}
