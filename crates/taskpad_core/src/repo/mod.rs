//! Repository layer: the remote store boundary.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract for tasks.
//! - Isolate REST wire details from store/state orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   transport errors.
//! - List results are always ordered newest-first by creation time.

pub mod memory_repo;
pub mod rest_repo;
pub mod task_repo;
