//! Core task-store logic for Taskpad.
//!
//! This crate is the single source of truth a presentation layer binds
//! to: the shared task list with loading/error state, the CRUD
//! operations behind it, and the remote store boundary they call.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use config::{ConfigError, Profile, RemoteConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
pub use repo::memory_repo::InMemoryTaskRepository;
pub use repo::rest_repo::RestTaskRepository;
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository};
pub use store::task_store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
