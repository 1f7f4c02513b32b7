//! Domain model for the task store.
//!
//! # Responsibility
//! - Define the canonical task record and its creation/update inputs.
//! - Enforce client-side validation before anything reaches the remote.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A task title is never blank once it passes validation.

pub mod task;
