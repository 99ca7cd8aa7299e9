//! Task wire types for the `TaskDeck` API.
//!
//! Defines the task entity, its status enum, the detached draft used for
//! pending edits, and the mutation payload bodies. These are the literal
//! JSON shapes the server produces and consumes:
//!
//! ```json
//! { "id": 1, "title": "Buy milk", "description": "", "status": "TODO" }
//! ```

use serde::{Deserialize, Serialize};

/// Minimum allowed task title length in characters (after trimming).
pub const MIN_TASK_TITLE_LENGTH: usize = 3;

/// Unique identifier for a task, assigned by the server on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a raw integer.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of a task.
///
/// The `Ord` derive follows declaration order, so statuses sort in
/// workflow order: `Todo < InProgress < Done`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TaskStatus {
    /// Task has not been started.
    #[default]
    #[serde(rename = "TODO")]
    Todo,
    /// Task is actively being worked on.
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    /// Task has been completed.
    #[serde(rename = "DONE")]
    Done,
}

impl TaskStatus {
    /// Human-readable label for UI display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }

    /// Returns the next status in the workflow cycle.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

/// A tracked work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation.
    pub id: TaskId,
    /// Short title, at least [`MIN_TASK_TITLE_LENGTH`] characters.
    pub title: String,
    /// Free-form description, may be empty.
    pub description: String,
    /// Current workflow status.
    pub status: TaskStatus,
}

/// A detached, editable copy of a task (or a blank record for creation).
///
/// Drafts never alias the canonical task they were copied from: mutating a
/// draft has no effect on any store until a remote mutation is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Pending title.
    pub title: String,
    /// Pending description.
    pub description: String,
    /// Pending status.
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Snapshots an existing task into an independent draft.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

/// Request body for a status update: `{"status": "DONE"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    /// The new status.
    pub status: TaskStatus,
}

/// Request body for a description update: `{"description": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionPatch {
    /// The new description.
    pub description: String,
}

/// Errors produced by local draft validation.
///
/// Validation happens at draft-capture time, before any remote call is
/// made; a draft that fails here never reaches the gateway.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    /// Title is missing or shorter than the minimum length.
    #[error("task title must be at least {MIN_TASK_TITLE_LENGTH} characters")]
    TitleTooShort,
}

/// Validates a draft before submission.
///
/// The title is trimmed and must contain at least
/// [`MIN_TASK_TITLE_LENGTH`] characters, which also rejects empty and
/// whitespace-only titles.
///
/// # Errors
///
/// Returns [`DraftError::TitleTooShort`] when the trimmed title is too short.
pub fn validate_draft(draft: &TaskDraft) -> Result<(), DraftError> {
    if draft.title.trim().chars().count() < MIN_TASK_TITLE_LENGTH {
        return Err(DraftError::TitleTooShort);
    }
    Ok(())
}
