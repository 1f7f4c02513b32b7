//! Task store: the view-facing state and CRUD surface.
//!
//! # Responsibility
//! - Hold the shared `tasks` / `loading` / `error` state all views read.
//! - Run every CRUD operation as a scoped round trip: loading acquired,
//!   repository called, state reconciled, loading released on every exit
//!   path.
//!
//! # Invariants
//! - `tasks` stays newest-first by creation time.
//! - A failed operation never changes the cached list.
//! - The error slot holds the collaborator's message verbatim and
//!   survives until cleared or until the next operation begins.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-kind store failure carrying the underlying message verbatim.
///
/// The store does not classify failures; callers branch on success and
/// surface the message as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StoreError {}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

#[derive(Default)]
struct StoreState {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

/// Shared point of truth for task data and CRUD side effects.
///
/// Generic over the repository so views run against the remote store in
/// production and against the in-memory repository in development and
/// tests.
pub struct TaskStore<R> {
    repo: R,
    state: Mutex<StoreState>,
}

/// Releases the loading flag when an operation leaves scope.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.state).loading = false;
    }
}

fn lock_state(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    // Critical sections never panic; recover from poisoning anyway.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store with an empty cache.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Creates a store and performs the initial list round trip.
    ///
    /// A failing initial fetch leaves an empty cache with the error slot
    /// set, exactly as a manual `list_tasks` failure would.
    pub async fn activate(repo: R) -> Self {
        let store = Self::new(repo);
        if store.list_tasks().await.is_err() {
            warn!("event=store_activate module=store status=error detail=initial_list_failed");
        } else {
            debug!("event=store_activate module=store status=ok");
        }
        store
    }

    /// Validates and creates a task, prepending it to the cached list.
    ///
    /// Blank titles are rejected locally: no round trip happens and the
    /// shared state is left untouched.
    pub async fn create_task(&self, draft: TaskDraft) -> StoreResult<Task> {
        draft.validate()?;
        let task = self
            .run_op("task_create", self.repo.insert_task(&draft), |state, task| {
                state.tasks.insert(0, task.clone());
            })
            .await?;
        Ok(task)
    }

    /// Fetches all tasks newest-first and replaces the cache wholesale.
    ///
    /// On failure the cache keeps its previous contents.
    pub async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.run_op("task_list", self.repo.list_tasks(), |state, tasks| {
            state.tasks = tasks.clone();
        })
        .await
    }

    /// Fetches exactly one task without touching the cached list.
    ///
    /// Used by edit flows to pre-populate a form.
    pub async fn get_task(&self, id: TaskId) -> StoreResult<Task> {
        self.run_op("task_get", self.repo.fetch_task(id), |_state, _task| {})
            .await
    }

    /// Applies a partial update and reconciles the cached entry.
    ///
    /// Fields absent from the patch are left untouched remotely; the
    /// cached entry is replaced by the server response. An id missing
    /// from the cache is not inserted.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> StoreResult<Task> {
        patch.validate()?;
        self.run_op("task_update", self.repo.update_task(id, &patch), |state, task| {
            if let Some(entry) = state.tasks.iter_mut().find(|entry| entry.id == id) {
                *entry = task.clone();
            }
        })
        .await
    }

    /// Deletes a task and drops it from the cache if present.
    ///
    /// The remote affecting zero rows is still reported as success.
    pub async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        self.run_op("task_delete", self.repo.delete_task(id), |state, _| {
            state.tasks.retain(|task| task.id != id);
        })
        .await
    }

    /// Clears the shared error slot. No network call.
    pub fn clear_error(&self) {
        lock_state(&self.state).error = None;
    }

    /// Cloned snapshot of the cached task list, newest-first.
    pub fn tasks(&self) -> Vec<Task> {
        lock_state(&self.state).tasks.clone()
    }

    /// Whether any operation is currently in flight.
    ///
    /// A single global flag: with overlapping operations it turns false
    /// as each call settles, so `false` does not mean every concurrently
    /// issued call has settled.
    pub fn is_loading(&self) -> bool {
        lock_state(&self.state).loading
    }

    /// Message of the most recent failure, if not yet cleared.
    pub fn last_error(&self) -> Option<String> {
        lock_state(&self.state).error.clone()
    }

    /// Scoped operation helper shared by every CRUD method.
    ///
    /// Acquires the loading flag and clears the error slot, awaits the
    /// repository call, applies the success reconciliation under the
    /// state lock, and records failures into the error slot. The guard
    /// releases the loading flag on every exit path.
    async fn run_op<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = RepoResult<T>>,
        apply: impl FnOnce(&mut StoreState, &T),
    ) -> StoreResult<T> {
        {
            let mut state = lock_state(&self.state);
            state.loading = true;
            state.error = None;
        }
        let _guard = LoadingGuard { state: &self.state };

        match call.await {
            Ok(value) => {
                apply(&mut *lock_state(&self.state), &value);
                debug!("event={op} module=store status=ok");
                Ok(value)
            }
            Err(err) => {
                let failure = StoreError::from(err);
                lock_state(&self.state).error = Some(failure.message.clone());
                warn!("event={op} module=store status=error detail={failure}");
                Err(failure)
            }
        }
    }
}
