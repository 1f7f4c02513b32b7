//! Shared task state and CRUD orchestration.
//!
//! # Responsibility
//! - Own the single shared copy of the task list plus loading/error flags.
//! - Orchestrate repository calls into view-facing operations.
//!
//! # Invariants
//! - The cached task list is mutated only by store methods.
//! - The loading flag is released on every exit path of every operation.

pub mod task_store;
