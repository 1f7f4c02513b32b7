//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the remote `task` collection.
//! - Provide creation drafts and partial patches with defaulting rules.
//!
//! # Invariants
//! - `id` is assigned by the repository at creation and never changes.
//! - `title` is rejected before submission when blank.
//! - `done` is always a concrete boolean once a task is loaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Canonical task record as stored in the remote collection.
///
/// Field names serialize snake_case to match the remote schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Remote-assigned stable ID, immutable after creation.
    pub id: TaskId,
    /// Short task text. Never empty after validation.
    pub title: String,
    /// Optional longer text; stored as empty string when absent.
    #[serde(default)]
    pub description: String,
    /// Completion flag.
    pub done: bool,
    /// Assigned by the remote at creation, immutable.
    pub created_at: DateTime<Utc>,
    /// Stamped on every update; absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validation failure for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty or whitespace-only.
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title cannot be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Creation input for a new task.
///
/// Missing optional fields are defaulted (`description = ""`,
/// `done = false`) before the record is sent to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl TaskDraft {
    /// Creates a draft from the required title with defaults applied.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            done: false,
        }
    }

    /// Sets the optional description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial completion flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Rejects drafts that must not reach the remote store.
    ///
    /// # Errors
    /// - `BlankTitle` when the title is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Partial update for an existing task.
///
/// Only fields that are `Some` are serialized and sent; the remote leaves
/// absent fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TaskPatch {
    /// Patch that only toggles the completion flag.
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }

    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }

    /// Rejects patches that would blank out the title.
    ///
    /// # Errors
    /// - `BlankTitle` when a title is present but empty/whitespace-only.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TaskValidationError::BlankTitle);
            }
        }
        Ok(())
    }
}
